pub mod sanitize;
pub use sanitize::{DEFAULT_BLOCKLIST_RESPONSE, Rejection, Sanitize, Screened, Strip, Validate};
pub(crate) use sanitize::check_type;

pub mod url;
pub use url::{ParsedUrl, Scheme, TargetType, UrlErrors};

pub mod validator;
pub use validator::{ValidationOutcome, Validator};

pub mod source;
pub use source::{Clock, Echo, LineSource, ManualClock, ReadError, ScriptedSource, SystemClock, Written};

pub mod retry;
pub use retry::{Exhausted, RetryLoop, Step};

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        pub mod masked;
        pub use masked::{Keystroke, MaskedLine};

        pub mod terminal;
        pub use terminal::{StdinSource, Terminal};
    }
}
