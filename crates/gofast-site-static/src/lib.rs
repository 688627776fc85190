//! Static site generator for the Gofast documentation site.
//!
//! Renders the homepage and the markdown docs of every configured locale
//! into a static HTML tree, checks every internal link, then writes the
//! pages together with the theme assets, sitemap and static files.

pub mod assets;
pub mod builder;
pub mod components;
pub mod docs;
pub mod links;
pub mod markup;
pub mod routes;
pub mod templates;

pub use builder::{BuildError, BuildOptions, BuildResult, StaticBuilder};
pub use components::{render_features, FeatureBlock, HomePage, HeroContent, MESSAGES};
pub use markup::Html;
