//! Migration: Insert the rows every installation starts with.
//!
//! The default organization, the administrator account and the internal
//! property pointing at the default organization are expected to survive
//! any backend cleanup.

use chrono::Utc;
use domain::{
    ADMIN_LOGIN, COLUMN_KEE, COLUMN_LOGIN, DEFAULT_ORGANIZATION_KEY, DEFAULT_ORGANIZATION_NAME,
    INTERNAL_PROPERTY_DEFAULT_ORGANIZATION, TABLE_INTERNAL_PROPERTIES, TABLE_ORGANIZATIONS,
    TABLE_USERS,
};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;
use uuid::Uuid;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let now = Utc::now().timestamp_millis();
        let organization_uuid = Uuid::new_v4().to_string();

        let organization = Query::insert()
            .into_table(Alias::new(TABLE_ORGANIZATIONS))
            .columns([
                Alias::new("uuid"),
                Alias::new(COLUMN_KEE),
                Alias::new("name"),
                Alias::new("created_at"),
            ])
            .values_panic([
                organization_uuid.clone().into(),
                DEFAULT_ORGANIZATION_KEY.into(),
                DEFAULT_ORGANIZATION_NAME.into(),
                now.into(),
            ])
            .to_owned();

        let admin = Query::insert()
            .into_table(Alias::new(TABLE_USERS))
            .columns([
                Alias::new(COLUMN_LOGIN),
                Alias::new("name"),
                Alias::new("active"),
                Alias::new("created_at"),
            ])
            .values_panic([
                ADMIN_LOGIN.into(),
                "Administrator".into(),
                true.into(),
                now.into(),
            ])
            .to_owned();

        let default_organization_property = Query::insert()
            .into_table(Alias::new(TABLE_INTERNAL_PROPERTIES))
            .columns([
                Alias::new(COLUMN_KEE),
                Alias::new("text_value"),
                Alias::new("created_at"),
            ])
            .values_panic([
                INTERNAL_PROPERTY_DEFAULT_ORGANIZATION.into(),
                organization_uuid.into(),
                now.into(),
            ])
            .to_owned();

        let db = manager.get_connection();
        let backend = manager.get_database_backend();
        for insert in [organization, admin, default_organization_property] {
            db.execute(backend.build(&insert)).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let deletes = [
            (TABLE_INTERNAL_PROPERTIES, COLUMN_KEE, INTERNAL_PROPERTY_DEFAULT_ORGANIZATION),
            (TABLE_USERS, COLUMN_LOGIN, ADMIN_LOGIN),
            (TABLE_ORGANIZATIONS, COLUMN_KEE, DEFAULT_ORGANIZATION_KEY),
        ];

        let db = manager.get_connection();
        let backend = manager.get_database_backend();
        for (table, column, value) in deletes {
            let delete = Query::delete()
                .from_table(Alias::new(table))
                .and_where(Expr::col(Alias::new(column)).eq(value))
                .to_owned();
            db.execute(backend.build(&delete)).await?;
        }

        Ok(())
    }
}
