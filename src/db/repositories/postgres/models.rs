use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::items;
use crate::api::{Item, ItemId};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemRow {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: ItemId::new(row.id),
            title: row.title,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = items)]
pub struct NewItemRow {
    pub title: String,
}
