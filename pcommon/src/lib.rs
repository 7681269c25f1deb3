//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use pcommon::{GenerationOptions, OptionsViolation};
//!
//! let options = GenerationOptions::default()
//!     .with_temperature(0.3)
//!     .with_max_tokens(200);
//! assert!(options.check().is_ok());
//!
//! let too_hot = GenerationOptions::default().with_temperature(3.5);
//! assert_eq!(too_hot.check(), Err(OptionsViolation::TemperatureOutOfRange(3.5)));
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use pcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod model {
    //! Sampling settings shared by provider requests and gateway payloads.

    use std::fmt::{Display, Formatter};
    use std::ops::RangeInclusive;

    /// Temperatures accepted by OpenAI-compatible providers.
    pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=2.0;

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct GenerationOptions {
        pub temperature: Option<f32>,
        pub max_tokens: Option<u32>,
    }

    impl GenerationOptions {
        pub fn new(temperature: f32, max_tokens: u32) -> Self {
            Self {
                temperature: Some(temperature),
                max_tokens: Some(max_tokens),
            }
        }

        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = Some(temperature);
            self
        }

        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = Some(max_tokens);
            self
        }

        /// Checks the values that are set; unset values are left to the provider.
        pub fn check(&self) -> Result<(), OptionsViolation> {
            if self.max_tokens == Some(0) {
                return Err(OptionsViolation::ZeroMaxTokens);
            }

            if let Some(temperature) = self.temperature {
                if !TEMPERATURE_RANGE.contains(&temperature) {
                    return Err(OptionsViolation::TemperatureOutOfRange(temperature));
                }
            }

            Ok(())
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum OptionsViolation {
        ZeroMaxTokens,
        TemperatureOutOfRange(f32),
    }

    impl Display for OptionsViolation {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::ZeroMaxTokens => f.write_str("max_tokens must be greater than zero"),
                Self::TemperatureOutOfRange(value) => write!(
                    f,
                    "temperature must be in the inclusive range 0.0..=2.0, got {value}"
                ),
            }
        }
    }

    impl std::error::Error for OptionsViolation {}
}

pub use future::BoxFuture;
pub use model::{GenerationOptions, OptionsViolation, TEMPERATURE_RANGE};
