use failure::Fail;

/// Errors of the crate.
///
/// The timeline itself only ever returns `InvalidArgument`, the other kinds come from the replay tool.
#[derive(Debug, Fail)]
pub enum TimelineErr {
    #[fail(display = "Invalid argument: {}", _0)]
    InvalidArgument(String),

    #[fail(display = "{}", _0)]
    FileIoErr(std::io::Error),

    #[fail(display = "Cannot parse script: {}", _0)]
    ScriptErr(String),

    #[fail(display = "Invalid option: {}", _0)]
    OptionErr(String),
}

impl From<std::io::Error> for TimelineErr {
    fn from(e: std::io::Error) -> Self {
        TimelineErr::FileIoErr(e)
    }
}

impl From<serde_yaml::Error> for TimelineErr {
    fn from(e: serde_yaml::Error) -> Self {
        TimelineErr::ScriptErr(e.to_string())
    }
}

impl From<serde_json::Error> for TimelineErr {
    fn from(e: serde_json::Error) -> Self {
        TimelineErr::ScriptErr(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TimelineErr>;
