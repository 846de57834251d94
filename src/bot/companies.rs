use std::{fs, path::Path};

use serde::Deserialize;

/* Companies holds the lookup table of listed companies.
 * It is read once from a JSON file at startup and never mutated afterwards,
 * so handlers share it behind an Arc without any locking.
 */

#[derive(thiserror::Error, Debug)]
pub enum CompanyError {
    #[error("could not read company list: {0}")]
    Read(#[from] std::io::Error),
    #[error("could not decode company list: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Company {
    pub id: i64,
    pub symbol: String,
}

#[derive(Clone, Debug, Default)]
pub struct Companies {
    records: Vec<Company>,
}

impl Companies {
    pub fn from_records(records: Vec<Company>) -> Companies {
        Companies { records }
    }

    // Loads the table from a JSON array of {id, symbol} objects.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Companies, CompanyError> {
        let contents = fs::read_to_string(path)?;
        let records: Vec<Company> = serde_json::from_str(&contents)?;
        Ok(Companies::from_records(records))
    }

    // Finds the exchange id of a symbol, ignoring case. First match wins.
    pub fn find_code(&self, symbol: &str) -> Option<i64> {
        let symbol = symbol.to_uppercase();
        self.records
            .iter()
            .find(|company| company.symbol.to_uppercase() == symbol)
            .map(|company| company.id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
