//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements            | Connects to                  |
//! |-------------|-----------------------|------------------------------|
//! | `accessory` | —                     | Host accessory-protocol stack|
//! | `hardware`  | RelayPort             | Relay GPIO                   |
//! |             | IndicatorPort         | Status LED GPIO              |
//! |             | ClockPort, DelayNs    | Clock + delay passthrough    |
//! | `log_sink`  | EventSink             | Serial log output            |
//! | `time`      | ClockPort             | ESP32 system timer           |

pub mod accessory;
pub mod hardware;
pub mod log_sink;
pub mod time;
