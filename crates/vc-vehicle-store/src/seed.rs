//! Sample data seeding

use rand::Rng;
use tracing::{debug, info};

use crate::domain::{generate_plate, Vehicle};
use crate::error::StoreError;
use crate::ports::VehicleStore;

/// Default number of sample vehicles written into an empty store
pub const DEFAULT_SEED_COUNT: usize = 1000;

/// Populate an empty store with `count` generated plates
///
/// Returns the number of vehicles written: 0 when the store already holds
/// data. Plates are random, so duplicates are possible and harmless.
pub async fn seed_if_empty<R: Rng>(
    store: &dyn VehicleStore,
    count: usize,
    rng: &mut R,
) -> Result<usize, StoreError> {
    let existing = store.count().await?;
    if existing > 0 {
        debug!(existing, "Store already populated, skipping seed");
        return Ok(0);
    }

    let vehicles: Vec<Vehicle> = (0..count)
        .map(|_| Vehicle::new(generate_plate(rng)))
        .collect();

    let written = store.insert_many(vehicles).await?;
    info!(written, "Seeded vehicle store with sample data");
    Ok(written)
}
