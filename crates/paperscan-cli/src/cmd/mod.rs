pub mod candidates;
pub mod crawl;
pub mod report;

use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use paperscan_crawl::{CrawlConfig, PartitionPolicy, split_list};

use crate::config::Config;

/// Which slice of the identifier space to enumerate
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Venues, by name or code (comma-separated)
    #[arg(short = 'c', long = "conferences", default_value = "acl,naacl,emnlp")]
    pub venues: String,

    /// Two-digit years (comma-separated)
    #[arg(short, long, default_value = "13,14,15,16,17,18,19")]
    pub years: String,

    /// Submission types: l = long, s = short (comma-separated)
    #[arg(short = 't', long = "types", default_value = "l,s")]
    pub submission_types: String,

    /// Highest sequence number tried per venue/year/type
    #[arg(long = "max-id", default_value_t = paperscan_crawl::config::DEFAULT_MAX_SEQUENCE)]
    pub max_id: u32,
}

impl SelectionArgs {
    /// Combine with the archive from the config file
    pub fn crawl_config(&self, config: &Config, workers: usize, policy: PartitionPolicy) -> CrawlConfig {
        CrawlConfig {
            archive: config.archive.clone(),
            venues: split_list(&self.venues),
            years: split_list(&self.years),
            submission_types: split_list(&self.submission_types),
            max_sequence: self.max_id,
            workers,
            policy,
        }
    }
}

/// Print the effective configuration on stderr
pub fn show_config(config: &Config) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Setting").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    let join_map = |map: &std::collections::BTreeMap<String, String>| {
        map.iter()
            .map(|(name, code)| format!("{name}={code}"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    table.add_row(vec![
        "Output file",
        &config.output.path.display().to_string(),
    ]);
    table.add_row(vec!["Archive base URL", &config.archive.base_url]);
    table.add_row(vec!["URL suffix", &config.archive.suffix]);
    table.add_row(vec![
        "Soft-404 URL",
        config.archive.soft_404_url.as_deref().unwrap_or("not set"),
    ]);
    table.add_row(vec!["Venues", &join_map(&config.archive.venues)]);
    table.add_row(vec![
        "Submission types",
        &join_map(&config.archive.submission_types),
    ]);
    table.add_row(vec![
        "Workers",
        &format!(
            "{} (max: {}, {})",
            config.workers.default, config.workers.max, config.workers.policy
        ),
    ]);
    table.add_row(vec!["Extractor", &config.extract.command]);
    table.add_row(vec![
        "Extract timeout",
        &format!("{}s", config.extract.timeout_secs),
    ]);
    table.add_row(vec![
        "Staging dir",
        &config
            .extract
            .staging_dir
            .as_ref()
            .map_or_else(|| "system temp".to_string(), |p| p.display().to_string()),
    ]);
    table.add_row(vec![
        "HTTP timeout",
        &format!("{}s", config.http.timeout_secs),
    ]);

    eprintln!("\n{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        selection: SelectionArgs,
    }

    #[test]
    fn defaults_match_crawl_defaults() {
        let w = Wrapper::parse_from(["paperscan"]);
        let crawl = w
            .selection
            .crawl_config(&Config::default(), 1, PartitionPolicy::Contiguous);
        let defaults = CrawlConfig::default();
        assert_eq!(crawl.venues, defaults.venues);
        assert_eq!(crawl.years, defaults.years);
        assert_eq!(crawl.submission_types, defaults.submission_types);
        assert_eq!(crawl.max_sequence, defaults.max_sequence);
    }

    #[test]
    fn lists_are_split() {
        let w = Wrapper::parse_from(["paperscan", "-c", "acl", "-y", "18,19", "--max-id", "20"]);
        let crawl = w
            .selection
            .crawl_config(&Config::default(), 2, PartitionPolicy::Striped);
        assert_eq!(crawl.venues, vec!["acl"]);
        assert_eq!(crawl.years, vec!["18", "19"]);
        assert_eq!(crawl.max_sequence, 20);
        assert_eq!(crawl.workers, 2);
        assert_eq!(crawl.candidates().unwrap().len(), 2 * 2 * 20);
    }
}
