//! Integration tests for producer / farm / harvest / crop persistence.
//!
//! Exercises the repository layer against a real database:
//! - Full hierarchy creation
//! - Cascade delete behaviour
//! - Unique and check constraint violations
//! - Partial updates

use agro_db::models::crop::{CreateCrop, UpdateCrop, UQ_CROPS_HARVEST_ID_NAME};
use agro_db::models::farm::{CreateFarm, UpdateFarm, CK_FARMS_AREA_SUM};
use agro_db::models::harvest::CreateHarvest;
use agro_db::models::producer::{CreateProducer, UpdateProducer, UQ_PRODUCERS_DOCUMENT};
use agro_db::repositories::{CropRepo, FarmRepo, HarvestRepo, ProducerRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_producer(document: &str, name: &str) -> CreateProducer {
    CreateProducer {
        document: document.to_string(),
        name: name.to_string(),
    }
}

fn new_farm(producer_id: i64, name: &str) -> CreateFarm {
    CreateFarm {
        producer_id,
        name: name.to_string(),
        city: "Londrina".to_string(),
        state: "PR".to_string(),
        total_area: 500.0,
        arable_area: 350.0,
        vegetation_area: 150.0,
    }
}

fn constraint_of(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint().map(str::to_string),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Test: Full hierarchy creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_full_hierarchy(pool: PgPool) {
    let producer = ProducerRepo::create(&pool, &new_producer("52998224725", "João Silva"))
        .await
        .unwrap();
    assert_eq!(producer.document, "52998224725");

    let farm = FarmRepo::create(&pool, &new_farm(producer.id, "Fazenda Boa Vista"))
        .await
        .unwrap();
    assert_eq!(farm.producer_id, producer.id);
    assert_eq!(farm.state, "PR");

    let harvest = HarvestRepo::create(
        &pool,
        &CreateHarvest {
            farm_id: farm.id,
            year: 2024,
        },
    )
    .await
    .unwrap();
    assert_eq!(harvest.farm_id, farm.id);

    let crop = CropRepo::create(
        &pool,
        &CreateCrop {
            harvest_id: harvest.id,
            name: "Soja".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(crop.harvest_id, harvest.id);

    let farms = FarmRepo::list_by_producer(&pool, producer.id).await.unwrap();
    assert_eq!(farms.len(), 1);
    let crops = CropRepo::list_by_harvest(&pool, harvest.id).await.unwrap();
    assert_eq!(crops.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: Cascade delete producer removes all children
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cascade_delete_producer(pool: PgPool) {
    let producer = ProducerRepo::create(&pool, &new_producer("11222333000181", "Agro Ltda"))
        .await
        .unwrap();
    let farm = FarmRepo::create(&pool, &new_farm(producer.id, "Rancho Alegre"))
        .await
        .unwrap();
    let harvest = HarvestRepo::create(
        &pool,
        &CreateHarvest {
            farm_id: farm.id,
            year: 2023,
        },
    )
    .await
    .unwrap();

    assert!(ProducerRepo::delete(&pool, producer.id).await.unwrap());

    assert!(FarmRepo::find_by_id(&pool, farm.id).await.unwrap().is_none());
    assert!(HarvestRepo::find_by_id(&pool, harvest.id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: Unique constraint on producer document
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_document_violates_unique_constraint(pool: PgPool) {
    ProducerRepo::create(&pool, &new_producer("52998224725", "First"))
        .await
        .unwrap();

    let err = ProducerRepo::create(&pool, &new_producer("52998224725", "Second"))
        .await
        .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some(UQ_PRODUCERS_DOCUMENT));
}

// ---------------------------------------------------------------------------
// Test: Unique constraint on (harvest_id, crop name)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_crop_name_per_harvest(pool: PgPool) {
    let producer = ProducerRepo::create(&pool, &new_producer("52998224725", "P"))
        .await
        .unwrap();
    let farm = FarmRepo::create(&pool, &new_farm(producer.id, "F"))
        .await
        .unwrap();
    let h1 = HarvestRepo::create(
        &pool,
        &CreateHarvest {
            farm_id: farm.id,
            year: 2022,
        },
    )
    .await
    .unwrap();
    let h2 = HarvestRepo::create(
        &pool,
        &CreateHarvest {
            farm_id: farm.id,
            year: 2023,
        },
    )
    .await
    .unwrap();

    let corn = |harvest_id| CreateCrop {
        harvest_id,
        name: "Milho".to_string(),
    };

    CropRepo::create(&pool, &corn(h1.id)).await.unwrap();
    // Same name in a different harvest is fine.
    CropRepo::create(&pool, &corn(h2.id)).await.unwrap();

    let err = CropRepo::create(&pool, &corn(h1.id)).await.unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some(UQ_CROPS_HARVEST_ID_NAME));
}

// ---------------------------------------------------------------------------
// Test: Partial farm update that breaks the stored area sum is rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_farm_update_respects_area_sum(pool: PgPool) {
    let producer = ProducerRepo::create(&pool, &new_producer("52998224725", "P"))
        .await
        .unwrap();
    let farm = FarmRepo::create(&pool, &new_farm(producer.id, "F"))
        .await
        .unwrap();

    // 350 + 150 = 500; shrinking the total alone must fail.
    let shrink = UpdateFarm {
        total_area: Some(400.0),
        ..Default::default()
    };
    let err = FarmRepo::update(&pool, farm.id, &shrink).await.unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some(CK_FARMS_AREA_SUM));

    let rename = UpdateFarm {
        name: Some("Fazenda Nova".to_string()),
        ..Default::default()
    };
    let updated = FarmRepo::update(&pool, farm.id, &rename)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Fazenda Nova");
    assert_eq!(updated.total_area, 500.0);
}

// ---------------------------------------------------------------------------
// Test: Update and lookup operations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_producer_and_find_by_document(pool: PgPool) {
    let producer = ProducerRepo::create(&pool, &new_producer("52998224725", "Old Name"))
        .await
        .unwrap();

    let updated = ProducerRepo::update(
        &pool,
        producer.id,
        &UpdateProducer {
            name: Some("New Name".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.name, "New Name");
    assert_eq!(updated.document, "52998224725");

    let found = ProducerRepo::find_by_document(&pool, "52998224725")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, producer.id);

    let missing = ProducerRepo::update(&pool, 999_999, &UpdateProducer::default())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rename_crop_into_existing_name_conflicts(pool: PgPool) {
    let producer = ProducerRepo::create(&pool, &new_producer("52998224725", "P"))
        .await
        .unwrap();
    let farm = FarmRepo::create(&pool, &new_farm(producer.id, "F"))
        .await
        .unwrap();
    let harvest = HarvestRepo::create(
        &pool,
        &CreateHarvest {
            farm_id: farm.id,
            year: 2024,
        },
    )
    .await
    .unwrap();

    CropRepo::create(
        &pool,
        &CreateCrop {
            harvest_id: harvest.id,
            name: "Café".to_string(),
        },
    )
    .await
    .unwrap();
    let cotton = CropRepo::create(
        &pool,
        &CreateCrop {
            harvest_id: harvest.id,
            name: "Algodão".to_string(),
        },
    )
    .await
    .unwrap();

    let err = CropRepo::update(
        &pool,
        cotton.id,
        &UpdateCrop {
            name: Some("Café".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(constraint_of(&err).as_deref(), Some(UQ_CROPS_HARVEST_ID_NAME));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_decimal_areas_summing_to_total_are_stored(pool: PgPool) {
    let producer = ProducerRepo::create(&pool, &new_producer("52998224725", "P"))
        .await
        .unwrap();

    let farm = FarmRepo::create(
        &pool,
        &CreateFarm {
            total_area: 0.3,
            arable_area: 0.1,
            vegetation_area: 0.2,
            ..new_farm(producer.id, "Chácara")
        },
    )
    .await
    .unwrap();
    assert_eq!(farm.total_area, 0.3);
}
