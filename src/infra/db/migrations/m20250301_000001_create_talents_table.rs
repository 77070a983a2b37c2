//! Migration: Create the talents table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Talents::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Talents::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Talents::Nombre).string().not_null())
                    .col(ColumnDef::new(Talents::Genero).string().not_null())
                    .col(ColumnDef::new(Talents::Altura).string().null())
                    .col(ColumnDef::new(Talents::Experiencia).string().null())
                    .col(ColumnDef::new(Talents::Especialidad).string().null())
                    .col(ColumnDef::new(Talents::Descripcion).text().null())
                    .col(
                        ColumnDef::new(Talents::Rating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Talents::Tags).json_binary().not_null())
                    .col(ColumnDef::new(Talents::Fotos).json_binary().not_null())
                    // Derived: always fotos[0]; recomputed by the repository
                    .col(ColumnDef::new(Talents::Foto).string().null())
                    .col(
                        ColumnDef::new(Talents::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Talents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Public catalog filters on active; dashboard and feeds sort and
        // threshold on created_at
        manager
            .create_index(
                Index::create()
                    .name("idx_talents_active")
                    .table(Talents::Table)
                    .col(Talents::Active)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_talents_created_at")
                    .table(Talents::Table)
                    .col(Talents::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Talents::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Talents {
    Table,
    Id,
    Nombre,
    Genero,
    Altura,
    Experiencia,
    Especialidad,
    Descripcion,
    Rating,
    Tags,
    Fotos,
    Foto,
    Active,
    CreatedAt,
}
