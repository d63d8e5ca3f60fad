//! Protocol message types and wire constants.

/// Command tag of the modified-paths list request.
pub const MODIFIED_PATHS_TAG: &str = "MPL";

/// The only protocol version spoken by this hook.
pub const PROTOCOL_VERSION: &str = "1";

/// First response byte when the service handled the request.
pub const SUCCESS_MARKER: u8 = b'S';

/// Length of the status prefix at the start of every response.
pub const STATUS_LEN: usize = 2;

/// Byte that ends both the request line and the response stream.
pub const TERMINATOR: u8 = b'\n';

/// Separator between a command tag and its body.
const SEPARATOR: u8 = b'|';

/// Request sent from the hook to the mount service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Request {
    /// Ask for the list of paths modified in the working tree.
    ModifiedPathsList,
}

impl Request {
    /// Returns the full wire frame for this request, terminator included.
    pub const fn frame(self) -> &'static [u8] {
        match self {
            Self::ModifiedPathsList => b"MPL|1\n",
        }
    }

    /// Returns the command tag that opens the frame.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::ModifiedPathsList => MODIFIED_PATHS_TAG,
        }
    }
}
