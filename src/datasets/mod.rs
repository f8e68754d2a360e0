//! Raw recipe datasets
//!
//! Each dataset is a JSON-lines file of scraped recipes with its own field
//! names. [`DataSet::adapt`] maps one line onto the Recipe wire mapping and
//! [`pipeline`] turns whole files into JSON-LD.

pub mod adapter;
pub mod error;
pub mod pipeline;

use std::path::PathBuf;

use serde_json::{Map, Value};

pub use adapter::Adapted;
pub use error::{DatasetError, DatasetResult};
pub use pipeline::{ConversionReport, convert_dataset, convert_file, convert_reader};

use crate::config::DatatransConfig;
use crate::enums::WireEnum;
use crate::wire_enum;

wire_enum! {
    /// A known recipe dataset
    pub enum DataSet {
        Allrecipes => "allrecipes",
        BbcCoUk => "bbccouk",
        Cookstr => "cookstr",
        Epicurious => "epicurious",
    }
}

impl DataSet {
    pub fn name(&self) -> &'static str {
        self.as_wire()
    }

    /// Raw JSON-lines file name, e.g. `cookstr-recipes.json`
    pub fn asset_file_name(&self) -> String {
        format!("{}-recipes.json", self.name())
    }

    /// Converted JSON-LD file name, e.g. `cookstr-recipes.json-ld`
    pub fn output_file_name(&self) -> String {
        format!("{}-recipes.json-ld", self.name())
    }

    pub fn asset_path(&self, config: &DatatransConfig) -> PathBuf {
        config.assets_dir.join(self.asset_file_name())
    }

    pub fn output_path(&self, config: &DatatransConfig) -> PathBuf {
        config.assets_dir.join(self.output_file_name())
    }

    /// Map one raw line onto camelCase Recipe keys
    pub fn adapt(&self, source: &Map<String, Value>) -> Adapted {
        match self {
            DataSet::Allrecipes => adapter::adapt_allrecipes(source),
            DataSet::BbcCoUk => adapter::adapt_bbccouk(source),
            DataSet::Cookstr => adapter::adapt_cookstr(source),
            DataSet::Epicurious => adapter::adapt_epicurious(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_file_names() {
        assert_eq!(DataSet::Cookstr.asset_file_name(), "cookstr-recipes.json");
        assert_eq!(DataSet::BbcCoUk.output_file_name(), "bbccouk-recipes.json-ld");
        let config = DatatransConfig::builder().assets_dir("data").build();
        assert_eq!(
            DataSet::Epicurious.asset_path(&config),
            Path::new("data").join("epicurious-recipes.json")
        );
    }

    #[test]
    fn test_parse_dataset_name() {
        assert_eq!("allrecipes".parse::<DataSet>().unwrap(), DataSet::Allrecipes);
        assert!("bbc".parse::<DataSet>().is_err());
    }
}
