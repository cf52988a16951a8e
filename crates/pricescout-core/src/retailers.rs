use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Country the directory falls back to when no table exists for the
/// requested one.
const DEFAULT_COUNTRY: &str = "united states";

/// Compiled-in retailer tables, keyed by country name.
///
/// These are the stores treated as "local" when ranking comparisons for a
/// shopper in that country. A YAML file can replace individual tables at
/// startup without touching this list.
const BUILTIN: &[(&str, &[&str])] = &[
    (
        "Germany",
        &[
            "amazon.de",
            "mediamarkt.de",
            "saturn.de",
            "otto.de",
            "idealo.de",
            "geizhals.de",
            "preisvergleich.de",
            "galaxus.de",
            "coolblue.de",
            "cyberport.de",
            "alternate.de",
            "mindfactory.de",
            "caseking.de",
            "hardwareversand.de",
            "computeruniverse.net",
            "notebooksbilliger.de",
            "redcoon.de",
            "arlt.com",
            "hifi-schluderbacher.de",
            "premiumhifi.de",
        ],
    ),
    (
        "United States",
        &[
            "amazon.com",
            "walmart.com",
            "target.com",
            "bestbuy.com",
            "newegg.com",
            "bhphotovideo.com",
            "adorama.com",
            "microcenter.com",
            "ebay.com",
            "costco.com",
            "samsclub.com",
        ],
    ),
    (
        "United Kingdom",
        &[
            "amazon.co.uk",
            "currys.co.uk",
            "argos.co.uk",
            "johnlewis.com",
            "very.co.uk",
            "ao.com",
            "ebay.co.uk",
            "scan.co.uk",
            "overclockers.co.uk",
        ],
    ),
    (
        "France",
        &[
            "amazon.fr",
            "fnac.com",
            "darty.com",
            "boulanger.com",
            "ldlc.com",
            "materiel.net",
            "rue-du-commerce.fr",
            "cdiscount.com",
        ],
    ),
    (
        "Italy",
        &[
            "amazon.it",
            "unieuro.it",
            "mediaworld.it",
            "trony.it",
            "euronics.it",
        ],
    ),
    (
        "Spain",
        &[
            "amazon.es",
            "pccomponentes.com",
            "mediamarkt.es",
            "elcorteingles.es",
        ],
    ),
    (
        "Netherlands",
        &[
            "amazon.nl",
            "bol.com",
            "coolblue.nl",
            "mediamarkt.nl",
            "saturn.nl",
        ],
    ),
    (
        "Belgium",
        &[
            "amazon.be",
            "bol.com",
            "coolblue.be",
            "mediamarkt.be",
            "saturn.be",
        ],
    ),
    (
        "Austria",
        &[
            "amazon.at",
            "mediamarkt.at",
            "saturn.at",
            "otto.at",
            "idealo.at",
        ],
    ),
    (
        "Switzerland",
        &[
            "amazon.ch",
            "digitec.ch",
            "galaxus.ch",
            "mediamarkt.ch",
            "saturn.ch",
        ],
    ),
];

#[derive(Debug, Clone, Deserialize)]
pub struct RetailerEntry {
    pub country: String,
    pub domains: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RetailersFile {
    pub retailers: Vec<RetailerEntry>,
}

/// Lookup from country to the retailer domains considered local there.
#[derive(Debug, Clone)]
pub struct RetailerDirectory {
    by_country: HashMap<String, Vec<String>>,
}

impl RetailerDirectory {
    /// Directory built from the compiled-in tables only.
    #[must_use]
    pub fn builtin() -> Self {
        let by_country = BUILTIN
            .iter()
            .map(|(country, domains)| {
                (
                    country.to_lowercase(),
                    domains.iter().map(|d| (*d).to_string()).collect(),
                )
            })
            .collect();
        Self { by_country }
    }

    /// Local retailer domains for `country`, matched case-insensitively.
    ///
    /// Countries without a table fall back to the United States list.
    #[must_use]
    pub fn domains_for(&self, country: &str) -> &[String] {
        let key = country.trim().to_lowercase();
        if let Some(domains) = self.by_country.get(&key) {
            return domains;
        }
        self.by_country
            .get(DEFAULT_COUNTRY)
            .map_or(&[], Vec::as_slice)
    }

    /// Replace per-country tables with entries from a parsed override file.
    fn with_overrides(mut self, file: RetailersFile) -> Self {
        for entry in file.retailers {
            self.by_country
                .insert(entry.country.trim().to_lowercase(), entry.domains);
        }
        self
    }
}

/// Load retailer overrides from a YAML file and overlay them on the
/// compiled-in tables.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_retailers(path: &Path) -> Result<RetailerDirectory, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RetailersFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let retailers_file: RetailersFile =
        serde_yaml::from_str(&content).map_err(ConfigError::RetailersFileParse)?;

    validate_retailers(&retailers_file)?;

    Ok(RetailerDirectory::builtin().with_overrides(retailers_file))
}

fn validate_retailers(retailers_file: &RetailersFile) -> Result<(), ConfigError> {
    let mut seen_countries = HashSet::new();

    for entry in &retailers_file.retailers {
        if entry.country.trim().is_empty() {
            return Err(ConfigError::Validation(
                "retailer country must be non-empty".to_string(),
            ));
        }

        if entry.domains.is_empty() {
            return Err(ConfigError::Validation(format!(
                "retailer entry '{}' has no domains",
                entry.country
            )));
        }

        for domain in &entry.domains {
            if domain.trim().is_empty()
                || domain.contains("://")
                || domain.contains(char::is_whitespace)
            {
                return Err(ConfigError::Validation(format!(
                    "retailer entry '{}' has invalid domain '{}'; must be a bare domain like 'amazon.de'",
                    entry.country, domain
                )));
            }
        }

        if !seen_countries.insert(entry.country.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate retailer country: '{}'",
                entry.country
            )));
        }
    }

    Ok(())
}
