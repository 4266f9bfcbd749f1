use async_trait::async_trait;
use gusen_model::City;
use sqlx::{FromRow, PgPool};

use crate::{database::ports::CityStore, error::Result};

#[derive(Debug, FromRow)]
struct CityRow {
    city_code: i32,
    city_name: String,
    province_code: Option<String>,
    province_name: Option<String>,
}

impl From<CityRow> for City {
    fn from(row: CityRow) -> Self {
        City {
            city_code: row.city_code,
            city_name: row.city_name,
            province_code: row.province_code,
            province_name: row.province_name,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PostgresCityStore {
    pool: PgPool,
}

impl PostgresCityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityStore for PostgresCityStore {
    async fn list(&self) -> Result<Vec<City>> {
        let rows = sqlx::query_as::<_, CityRow>(
            "SELECT city_code, city_name, province_code, province_name \
             FROM cities ORDER BY city_code ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(City::from).collect())
    }
}
