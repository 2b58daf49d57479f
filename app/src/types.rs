use serde::{Deserialize, Serialize};

/// Size category accepted by the spinner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinnerSize {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl SpinnerSize {
    pub const ALL: [Self; 4] = [Self::Sm, Self::Md, Self::Lg, Self::Xl];

    /// Rendered width and height of the spinner, in pixels.
    #[must_use]
    pub const fn dimension(self) -> u32 {
        match self {
            Self::Sm => 24,
            Self::Md => 40,
            Self::Lg => 64,
            Self::Xl => 96,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }
}

/// Unknown names fall back to [`SpinnerSize::Md`].
impl From<&str> for SpinnerSize {
    fn from(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sm" => Self::Sm,
            "lg" => Self::Lg,
            "xl" => Self::Xl,
            _ => Self::Md,
        }
    }
}

/// Browser `loading` hint rendered on deferred images.
///
/// This is passed straight through to the `<img>` element and has no bearing
/// on when the real source is assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingMode {
    #[default]
    Lazy,
    Eager,
}

impl LoadingMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lazy => "lazy",
            Self::Eager => "eager",
        }
    }
}
