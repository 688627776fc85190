//! Reporting policy for build-time problems such as broken links.

use serde::Deserialize;

/// How a build reacts to a class of problem.
///
/// `Throw` fails the build. The other levels only differ in how loudly the
/// problem is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportingSeverity {
    Ignore,
    Log,
    Warn,
    #[default]
    Throw,
}

impl ReportingSeverity {
    /// Whether problems at this level abort the build.
    pub fn fails_build(self) -> bool {
        self == Self::Throw
    }

    /// Emit `message` at the level matching this severity.
    ///
    /// `Throw` is logged as an error; the caller is expected to fail afterwards.
    pub fn report(self, message: &str) {
        match self {
            Self::Ignore => {}
            Self::Log => tracing::info!("{}", message),
            Self::Warn => tracing::warn!("{}", message),
            Self::Throw => tracing::error!("{}", message),
        }
    }
}
