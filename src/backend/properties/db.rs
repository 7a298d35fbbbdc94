/**
 * Database Operations for Property Listings
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Property listing row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Property {
    /// Unique listing ID (UUID)
    pub id: Uuid,
    /// Advisor who published it
    pub advisor_id: Uuid,
    /// Property kind ("apartment", "house", ...)
    pub kind: String,
    /// Area in square meters
    pub area: i64,
    pub location: String,
    pub price: i64,
    pub payment_conditions: Option<String>,
    pub customer_type: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields required to publish a listing
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub kind: String,
    pub area: i64,
    pub location: String,
    pub price: i64,
    pub payment_conditions: Option<String>,
    pub customer_type: Option<String>,
    pub description: Option<String>,
}

const PROPERTY_COLUMNS: &str = "id, advisor_id, kind, area, location, price, \
                                payment_conditions, customer_type, description, created_at";

/// Publish a new listing under `advisor_id`
pub async fn create_property(
    pool: &SqlitePool,
    advisor_id: Uuid,
    new_property: NewProperty,
) -> Result<Property, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query_as::<_, Property>(&format!(
        r#"
        INSERT INTO properties (id, advisor_id, kind, area, location, price,
                                payment_conditions, customer_type, description, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {PROPERTY_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(advisor_id)
    .bind(&new_property.kind)
    .bind(new_property.area)
    .bind(&new_property.location)
    .bind(new_property.price)
    .bind(&new_property.payment_conditions)
    .bind(&new_property.customer_type)
    .bind(&new_property.description)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// List every published property, newest first
pub async fn list_properties(pool: &SqlitePool) -> Result<Vec<Property>, sqlx::Error> {
    sqlx::query_as::<_, Property>(&format!(
        "SELECT {PROPERTY_COLUMNS} FROM properties ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::policy::Role;
    use crate::backend::auth::users::{create_user, NewUser};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("failed to open in-memory database");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("failed to run migrations");
        pool
    }

    #[tokio::test]
    async fn test_publish_and_list() {
        let pool = test_pool().await;
        let advisor = create_user(
            &pool,
            NewUser {
                full_name: "Advisor".to_string(),
                email: "adv@x.com".to_string(),
                username: "advisor".to_string(),
                password_hash: "$2b$04$seedseedseedseedseedseedseedseedseedseedseedseedseeds"
                    .to_string(),
                city: None,
                region: None,
                expertise: Some("residential".to_string()),
                work_region: None,
                role: Role::Advisor,
            },
        )
        .await
        .unwrap();

        let property = create_property(
            &pool,
            advisor.id,
            NewProperty {
                kind: "house".to_string(),
                area: 140,
                location: "Durres".to_string(),
                price: 250_000,
                payment_conditions: Some("mortgage ok".to_string()),
                customer_type: None,
                description: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(property.advisor_id, advisor.id);

        let listings = list_properties(&pool).await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, property.id);
    }
}
