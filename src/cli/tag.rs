//! Entry tagging command

use ponder_core::{
    error::Result, EntryTags, PonderConfig, TaggingMode, TaggingService, TaggingStrategy,
};
use tracing::debug;

/// Handle entry tagging command
pub async fn handle(
    mut config: PonderConfig,
    title: String,
    context: Option<String>,
    mode: Option<TaggingMode>,
    json: bool,
) -> Result<()> {
    if let Some(mode) = mode {
        config.tagging.mode = mode;
    }

    let taxonomy = config.load_taxonomy()?;
    let service = TaggingService::from_config(&config, taxonomy);
    debug!("Tagging with {} strategy", service.strategy_name());

    let tags = service
        .tag_entry(Some(&title), context.as_deref())
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tags)?);
    } else {
        print_tags(&tags);
    }

    Ok(())
}

fn print_tags(tags: &EntryTags) {
    let domains = if tags.domain_tags.is_empty() {
        "(none)".to_string()
    } else {
        tags.domain_tags
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    println!("Domains:   {}", domains);
    println!("Sentiment: {}", tags.sentiment_tag);
    if tags.keywords.is_empty() {
        println!("Keywords:  (none)");
    } else {
        println!("Keywords:");
        for (i, keyword) in tags.keywords.iter().enumerate() {
            println!("  {}. {}", i + 1, keyword);
        }
    }
}
