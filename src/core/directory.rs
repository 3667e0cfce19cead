use crate::core::cache::{TtlCache, DIRECTORY_TTL, LOOKUP_TTL};
use crate::core::parser;
use crate::domain::model::PortRecord;
use crate::domain::ports::DirectorySource;
use crate::utils::error::{PortsError, Result};

/// A country page as cached: the raw HTML alongside its parsed ports.
#[derive(Clone)]
struct CountryPage {
    html: String,
    ports: Vec<PortRecord>,
}

/// Cached view over the upstream UN/LOCODE directory. Country listings are
/// held for 24 hours, individual LOCODE hits for one hour.
pub struct PortDirectory<S: DirectorySource> {
    source: S,
    countries: TtlCache<CountryPage>,
    locodes: TtlCache<PortRecord>,
}

impl<S: DirectorySource> PortDirectory<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            countries: TtlCache::new(DIRECTORY_TTL),
            locodes: TtlCache::new(LOOKUP_TTL),
        }
    }

    /// All ports for a country, in directory order, fetching and parsing
    /// the upstream page on a cache miss.
    pub async fn ports_for_country(&self, country_code: &str) -> Result<Vec<PortRecord>> {
        let key = country_code.trim().to_ascii_lowercase();

        if let Some(page) = self.countries.get(&key) {
            tracing::debug!("Cache hit for country: {}", key);
            return Ok(page.ports);
        }

        tracing::info!("📡 Fetching directory for country: {}", key);
        let html = self.source.fetch_country_page(&key).await?;
        let ports = parser::parse_directory(&html)?;
        tracing::info!("📂 Parsed {} ports for country: {}", ports.len(), key);

        self.countries.put(&key, CountryPage { html, ports: ports.clone() });
        Ok(ports)
    }

    /// Exact LOCODE lookup. Duplicate codes in the upstream page resolve to
    /// the first occurrence in directory order.
    pub async fn find_by_locode(&self, locode: &str) -> Result<Option<PortRecord>> {
        let code = locode.trim().to_ascii_uppercase();
        if code.len() != 5 || !code.is_ascii() {
            return Err(PortsError::ValidationError {
                message: format!("LOCODE must be five characters, got {:?}", locode),
            });
        }

        if let Some(port) = self.locodes.get(&code) {
            tracing::debug!("Cache hit for locode: {}", code);
            return Ok(Some(port));
        }

        let ports = self.ports_for_country(&code[..2]).await?;
        let found = ports.into_iter().find(|p| p.locode == code);
        if let Some(port) = &found {
            self.locodes.put(&code, port.clone());
        }
        Ok(found)
    }

    /// Case-insensitive substring search over names, capped at 10 matches.
    pub async fn search_by_name(&self, country_code: &str, term: &str) -> Result<Vec<PortRecord>> {
        let needle = term.trim().to_lowercase();
        let ports = self.ports_for_country(country_code).await?;
        Ok(ports
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.name_wo_diacritics.to_lowercase().contains(&needle)
            })
            .take(10)
            .collect())
    }

    /// Raw HTML for a country as last fetched, while still cached.
    pub fn cached_page_html(&self, country_code: &str) -> Option<String> {
        let key = country_code.trim().to_ascii_lowercase();
        self.countries.get(&key).map(|page| page.html)
    }

    /// Housekeeping only; `get` revalidates freshness on every read.
    pub fn sweep_expired(&self) {
        self.countries.sweep_expired();
        self.locodes.sweep_expired();
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Minimal directory page in the upstream table layout.
    pub(crate) fn directory_page(rows: &[(&str, &str, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(locode, name, coords)| {
                format!(
                    "<tr><td>&nbsp;</td><td>{locode}</td><td>{name}</td><td>{name}</td>\
                     <td></td><td>1-------</td><td>AI</td><td>0701</td>\
                     <td></td><td>{coords}</td><td></td></tr>"
                )
            })
            .collect();
        format!(
            r#"<html><body><table border="1" cellpadding="1" cellspacing="0">
            <tr><td>Ch</td><td>LOCODE</td><td>Name</td><td>NameWoDiacritics</td>
            <td>SubDiv</td><td>Function</td><td>Status</td><td>Date</td>
            <td>IATA</td><td>Coordinates</td><td>Remarks</td></tr>
            {body}</table></body></html>"#
        )
    }
}
