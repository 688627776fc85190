//! Homepage components.
//!
//! Pure functions from configuration to view models. Turning the view models
//! into HTML is left to [`crate::templates`].

pub mod features;
pub mod hero;
pub mod home;

pub use features::{render_features, FeatureBlock};
pub use hero::{CallToAction, HeroContent, HERO_CTA, HERO_TITLE, INTRODUCTION_ROUTE};
pub use home::{HomePage, PageMeta, MESSAGES};
