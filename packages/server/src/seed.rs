use common::{AssetStatus, RequestStatus, RequestType, UrgencyLevel, UserRole};
use sea_orm::*;
use tracing::info;

use crate::database::finish;
use crate::entity::{asset, category, request, request_history, user};
use crate::error::AppError;
use crate::utils::hash;

/// (name, description)
const CATEGORIES: &[(&str, &str)] = &[
    (
        "Electronics",
        "Electronic devices such as laptops, desktops, etc.",
    ),
    ("Furniture", "Office furniture including desks, chairs, etc."),
    ("Stationery", "Office stationery such as pens, paper, etc."),
];

/// (username, password, role, email)
const USERS: &[(&str, &str, UserRole, &str)] = &[
    ("john_doe", "password123", UserRole::Admin, "john@example.com"),
    (
        "jane_smith",
        "password456",
        UserRole::ProcurementManager,
        "jane@example.com",
    ),
    (
        "alice_walker",
        "password789",
        UserRole::Employee,
        "alice@example.com",
    ),
];

struct SampleAsset {
    name: &'static str,
    description: &'static str,
    /// Index into `CATEGORIES`.
    category: usize,
    status: AssetStatus,
    image: &'static str,
    /// Index into `USERS`; present exactly for `Allocated` assets.
    holder: Option<usize>,
}

const ASSETS: &[SampleAsset] = &[
    SampleAsset {
        name: "Dell Laptop",
        description: "14-inch, 8GB RAM, Intel i5 processor laptop.",
        category: 0,
        status: AssetStatus::Available,
        image: "https://example.com/images/dell-laptop.jpg",
        holder: None,
    },
    SampleAsset {
        name: "Office Chair",
        description: "Ergonomic chair with lumbar support.",
        category: 1,
        status: AssetStatus::Allocated,
        image: "https://example.com/images/office-chair.jpg",
        holder: Some(0),
    },
    SampleAsset {
        name: "Projector",
        description: "4K resolution projector for office presentations.",
        category: 0,
        status: AssetStatus::UnderRepair,
        image: "https://example.com/images/projector.jpg",
        holder: None,
    },
    SampleAsset {
        name: "Samsung Monitor",
        description: "27-inch curved monitor, 4K resolution.",
        category: 0,
        status: AssetStatus::Available,
        image: "https://example.com/images/samsung-monitor.jpg",
        holder: None,
    },
    SampleAsset {
        name: "Desk Lamp",
        description: "Adjustable LED desk lamp.",
        category: 1,
        status: AssetStatus::Available,
        image: "https://example.com/images/desk-lamp.jpg",
        holder: None,
    },
];

struct SampleRequest {
    /// Index into `USERS`.
    user: usize,
    /// Index into `ASSETS`.
    asset: Option<usize>,
    request_type: RequestType,
    reason: &'static str,
    urgency: UrgencyLevel,
    status: RequestStatus,
    comment: &'static str,
}

const REQUESTS: &[SampleRequest] = &[
    SampleRequest {
        user: 1,
        asset: None,
        request_type: RequestType::NewAsset,
        reason: "New laptop needed for work.",
        urgency: UrgencyLevel::High,
        status: RequestStatus::Pending,
        comment: "Request created and awaiting approval.",
    },
    SampleRequest {
        user: 2,
        asset: Some(3),
        request_type: RequestType::Repair,
        reason: "Monitor screen flickering.",
        urgency: UrgencyLevel::Medium,
        status: RequestStatus::Pending,
        comment: "Request created and awaiting repair.",
    },
    SampleRequest {
        user: 0,
        asset: Some(1),
        request_type: RequestType::Repair,
        reason: "Chair has a broken wheel.",
        urgency: UrgencyLevel::Low,
        status: RequestStatus::Approved,
        comment: "Request approved for repair.",
    },
];

/// Load the sample catalog, users and requests.
///
/// Does nothing when any category already exists, so it is safe to run on
/// every startup.
pub async fn seed_sample_data<C>(db: &C) -> Result<(), AppError>
where
    C: ConnectionTrait + TransactionTrait,
{
    if category::Entity::find().one(db).await?.is_some() {
        info!("Catalog already populated, skipping sample data");
        return Ok(());
    }

    let txn = db.begin().await?;
    let result = insert_sample_data(&txn).await;
    finish(txn, result).await?;

    info!(
        categories = CATEGORIES.len(),
        users = USERS.len(),
        assets = ASSETS.len(),
        requests = REQUESTS.len(),
        "Sample data seeded"
    );
    Ok(())
}

async fn insert_sample_data<C: ConnectionTrait>(txn: &C) -> Result<(), AppError> {
    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for &(name, description) in CATEGORIES {
        let model = category::ActiveModel {
            name: Set(name.to_string()),
            description: Set(Some(description.to_string())),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        category_ids.push(model.id);
    }

    let mut user_ids = Vec::with_capacity(USERS.len());
    for &(username, password, role, email) in USERS {
        let password = hash::hash_password(password)
            .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;
        let model = user::ActiveModel {
            username: Set(username.to_string()),
            password: Set(password),
            role: Set(role),
            email: Set(email.to_string()),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        user_ids.push(model.id);
    }

    let mut asset_ids = Vec::with_capacity(ASSETS.len());
    for sample in ASSETS {
        let model = asset::ActiveModel {
            name: Set(sample.name.to_string()),
            description: Set(Some(sample.description.to_string())),
            category_id: Set(category_ids[sample.category]),
            status: Set(sample.status),
            image_url: Set(Some(sample.image.to_string())),
            allocated_to: Set(sample.holder.map(|i| user_ids[i])),
            ..Default::default()
        }
        .insert(txn)
        .await?;
        asset_ids.push(model.id);
    }

    for sample in REQUESTS {
        let model = request::ActiveModel {
            user_id: Set(user_ids[sample.user]),
            asset_id: Set(sample.asset.map(|i| asset_ids[i])),
            request_type: Set(sample.request_type),
            reason: Set(Some(sample.reason.to_string())),
            quantity: Set(1),
            urgency: Set(sample.urgency),
            status: Set(sample.status),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        request_history::ActiveModel {
            request_id: Set(model.id),
            status: Set(sample.status),
            comment: Set(Some(sample.comment.to_string())),
            ..Default::default()
        }
        .insert(txn)
        .await?;
    }

    Ok(())
}
