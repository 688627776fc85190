//! Homepage feature list.

use serde::Serialize;

use gofast_site_config::FeatureItem;

use crate::markup::Html;

/// One rendered feature: title heading followed by its description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureBlock {
    /// Rendering key; the feature title.
    pub key: String,
    pub title: String,
    pub description: Html,
}

/// Map feature items to blocks, one per item, in the same order.
pub fn render_features(items: &[FeatureItem]) -> Vec<FeatureBlock> {
    items
        .iter()
        .map(|item| FeatureBlock {
            key: item.title.clone(),
            title: item.title.clone(),
            // Feature descriptions come from site.toml, which is first-party content.
            description: Html::trusted(item.description.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gofast_site_config::default_features;
    use pretty_assertions::assert_eq;

    fn items(titles: &[&str]) -> Vec<FeatureItem> {
        titles
            .iter()
            .map(|t| FeatureItem::new(*t, format!("About {}", t)))
            .collect()
    }

    #[test]
    fn renders_blocks_in_input_order() {
        let blocks = render_features(&items(&["A", "B", "C", "D"]));

        let titles: Vec<_> = blocks.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn one_block_per_item() {
        for count in [0, 1, 4, 9] {
            let titles: Vec<String> = (0..count).map(|i| format!("Feature {}", i)).collect();
            let refs: Vec<&str> = titles.iter().map(String::as_str).collect();

            assert_eq!(render_features(&items(&refs)).len(), count);
        }
    }

    #[test]
    fn empty_list_renders_nothing() {
        assert!(render_features(&[]).is_empty());
    }

    #[test]
    fn title_doubles_as_key() {
        let blocks = render_features(&items(&["Only the required features"]));
        assert_eq!(blocks[0].key, "Only the required features");
    }

    #[test]
    fn description_keeps_markup() {
        let blocks = render_features(&default_features());

        assert!(blocks[0]
            .description
            .as_str()
            .contains("<strong>get started fast"));
    }
}
