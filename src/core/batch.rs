use crate::core::distance;
use crate::core::resolver::CoordinateResolver;
use crate::domain::model::{BulkResult, BulkRow, ProcessingStats, RowStatus};
use crate::domain::ports::{DirectorySource, Geocoder};

/// Sequential bulk distance runner. Rows are processed strictly in order so
/// progress is monotonic and upstream rate limits are respected; one row's
/// failure never aborts the batch.
pub struct BulkRunner<'a, S: DirectorySource, G: Geocoder> {
    resolver: CoordinateResolver<'a, S, G>,
}

impl<'a, S: DirectorySource, G: Geocoder> BulkRunner<'a, S, G> {
    pub fn new(resolver: CoordinateResolver<'a, S, G>) -> Self {
        Self { resolver }
    }

    /// Processes every row, invoking `on_progress` after each with the
    /// completed fraction and running stats.
    pub async fn run<F>(&self, rows: &[BulkRow], mut on_progress: F) -> Vec<BulkResult>
    where
        F: FnMut(f64, &ProcessingStats),
    {
        let mut results = Vec::with_capacity(rows.len());
        let mut stats = ProcessingStats {
            total: rows.len(),
            ..Default::default()
        };

        for row in rows {
            let outcome = self.process_row(row).await;
            match &outcome {
                Ok(_) => stats.successful += 1,
                Err(reason) => {
                    tracing::warn!(
                        "Row {} -> {} failed: {}",
                        row.source_location,
                        row.dest_location,
                        reason
                    );
                    stats.failed += 1;
                }
            }
            stats.processed += 1;

            results.push(match outcome {
                Ok(nm) => BulkResult {
                    row: row.clone(),
                    distance_nm: Some(nm),
                    status: RowStatus::Success,
                    error: None,
                },
                Err(reason) => BulkResult {
                    row: row.clone(),
                    distance_nm: None,
                    status: RowStatus::Error,
                    error: Some(reason),
                },
            });

            on_progress(stats.processed as f64 / stats.total as f64, &stats);
        }

        results
    }

    async fn process_row(&self, row: &BulkRow) -> std::result::Result<f64, String> {
        let source = self
            .resolver
            .resolve(row.source_type, &row.source_location, &row.source_country)
            .await
            .map_err(|e| e.to_string())?;

        let dest = self
            .resolver
            .resolve(row.dest_type, &row.dest_location, &row.dest_country)
            .await
            .map_err(|e| e.to_string())?;

        Ok(distance::haversine_nm(source, dest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::directory::fixtures::directory_page;
    use crate::core::directory::PortDirectory;
    use crate::domain::model::{Coordinates, LocationKind, PlaceKind};
    use crate::utils::error::Result;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MapSource(String);

    #[async_trait]
    impl DirectorySource for MapSource {
        async fn fetch_country_page(&self, _country_code: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct MockGeocoder(HashMap<String, Coordinates>);

    #[async_trait]
    impl Geocoder for MockGeocoder {
        async fn search(
            &self,
            query: &str,
            _country_code: &str,
            _kind: PlaceKind,
        ) -> Result<Option<Coordinates>> {
            Ok(self.0.get(query).copied())
        }
    }

    fn port_row(source: &str, dest: &str) -> BulkRow {
        BulkRow {
            source_type: LocationKind::Port,
            source_location: source.to_string(),
            source_country: source[..2].to_string(),
            dest_type: LocationKind::Port,
            dest_location: dest.to_string(),
            dest_country: dest[..2].to_string(),
        }
    }

    #[tokio::test]
    async fn test_row_failure_is_isolated_and_progress_monotonic() {
        let directory = PortDirectory::new(MapSource(directory_page(&[
            ("US&nbsp;NYC", "New York", "4042N 07400W"),
            ("US&nbsp;BOS", "Boston", "4222N 07103W"),
        ])));
        let geocoder = MockGeocoder(HashMap::new());
        let runner = BulkRunner::new(CoordinateResolver::new(&directory, &geocoder));

        let rows = vec![
            port_row("USNYC", "USBOS"),
            port_row("USNYC", "USZZZ"),
            port_row("USBOS", "USNYC"),
        ];

        let mut progress_calls = Vec::new();
        let results = runner
            .run(&rows, |fraction, stats| {
                progress_calls.push((fraction, *stats));
            })
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].status, RowStatus::Success);
        assert_eq!(results[1].status, RowStatus::Error);
        assert!(results[1].error.as_deref().unwrap().contains("USZZZ"));
        assert_eq!(results[2].status, RowStatus::Success);

        assert_eq!(progress_calls.len(), 3);
        let processed: Vec<usize> = progress_calls.iter().map(|(_, s)| s.processed).collect();
        assert_eq!(processed, vec![1, 2, 3]);
        assert!((progress_calls[2].0 - 1.0).abs() < 1e-9);
        assert_eq!(progress_calls[2].1.successful, 2);
        assert_eq!(progress_calls[2].1.failed, 1);
    }

    #[tokio::test]
    async fn test_symmetric_rows_agree() {
        let directory = PortDirectory::new(MapSource(directory_page(&[
            ("US&nbsp;NYC", "New York", "4042N 07400W"),
            ("US&nbsp;BOS", "Boston", "4222N 07103W"),
        ])));
        let geocoder = MockGeocoder(HashMap::new());
        let runner = BulkRunner::new(CoordinateResolver::new(&directory, &geocoder));

        let rows = vec![port_row("USNYC", "USBOS"), port_row("USBOS", "USNYC")];
        let results = runner.run(&rows, |_, _| {}).await;

        let a = results[0].distance_nm.unwrap();
        let b = results[1].distance_nm.unwrap();
        assert!((a - b).abs() < 1e-9);
        assert!(a > 0.0);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let directory = PortDirectory::new(MapSource(directory_page(&[])));
        let geocoder = MockGeocoder(HashMap::new());
        let runner = BulkRunner::new(CoordinateResolver::new(&directory, &geocoder));

        let mut calls = 0;
        let results = runner.run(&[], |_, _| calls += 1).await;

        assert!(results.is_empty());
        assert_eq!(calls, 0);
    }
}
