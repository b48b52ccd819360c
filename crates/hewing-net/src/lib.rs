pub mod codec;
pub mod dispatch;
pub mod error;
pub mod observer;
pub mod protocol;

pub use codec::{decode_event, decode_request, encode_event, encode_request};
pub use dispatch::{Requester, StationHost};
pub use error::NetError;
pub use observer::ObservedStation;
pub use protocol::{
    ChoiceEntry, RecipeSelect, StationEvent, StationRequest, StationSync, ToolAction,
    PROTOCOL_VERSION,
};
