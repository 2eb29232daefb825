use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn pk<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn timestamps<T: IntoIden>(table: TableCreateStatement, created: T, updated: T) -> TableCreateStatement {
    let mut table = table;
    table
        .col(
            ColumnDef::new(created)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        )
        .col(
            ColumnDef::new(updated)
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        );
    table
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(timestamps(
                Table::create()
                    .table(Types::Table)
                    .if_not_exists()
                    .col(pk(Types::Id))
                    .col(ColumnDef::new(Types::Name).string_len(255).not_null().unique_key())
                    .to_owned(),
                Types::CreatedAt,
                Types::UpdatedAt,
            ))
            .await?;

        manager
            .create_table(timestamps(
                Table::create()
                    .table(Brands::Table)
                    .if_not_exists()
                    .col(pk(Brands::Id))
                    .col(ColumnDef::new(Brands::Name).string_len(255).not_null().unique_key())
                    .to_owned(),
                Brands::CreatedAt,
                Brands::UpdatedAt,
            ))
            .await?;

        // Many-to-many: a type is sold by several brands and vice versa
        manager
            .create_table(timestamps(
                Table::create()
                    .table(TypeBrands::Table)
                    .if_not_exists()
                    .col(pk(TypeBrands::Id))
                    .col(ColumnDef::new(TypeBrands::TypeId).integer().not_null())
                    .col(ColumnDef::new(TypeBrands::BrandId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_type_brands_type_id")
                            .from(TypeBrands::Table, TypeBrands::TypeId)
                            .to(Types::Table, Types::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_type_brands_brand_id")
                            .from(TypeBrands::Table, TypeBrands::BrandId)
                            .to(Brands::Table, Brands::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_type_brands_unique_pair")
                            .col(TypeBrands::TypeId)
                            .col(TypeBrands::BrandId)
                            .unique(),
                    )
                    .to_owned(),
                TypeBrands::CreatedAt,
                TypeBrands::UpdatedAt,
            ))
            .await?;

        manager
            .create_table(timestamps(
                Table::create()
                    .table(Devices::Table)
                    .if_not_exists()
                    .col(pk(Devices::Id))
                    .col(ColumnDef::new(Devices::Name).string_len(255).not_null().unique_key())
                    .col(ColumnDef::new(Devices::Price).integer().not_null())
                    .col(ColumnDef::new(Devices::OldPrice).integer().null())
                    .col(ColumnDef::new(Devices::Description).text().null())
                    .col(ColumnDef::new(Devices::Rating).integer().not_null().default(0))
                    .col(ColumnDef::new(Devices::Img).string_len(255).not_null())
                    .col(ColumnDef::new(Devices::TypeId).integer().null())
                    .col(ColumnDef::new(Devices::BrandId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_devices_type_id")
                            .from(Devices::Table, Devices::TypeId)
                            .to(Types::Table, Types::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_devices_brand_id")
                            .from(Devices::Table, Devices::BrandId)
                            .to(Brands::Table, Brands::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
                Devices::CreatedAt,
                Devices::UpdatedAt,
            ))
            .await?;

        manager
            .create_table(timestamps(
                Table::create()
                    .table(DeviceInfos::Table)
                    .if_not_exists()
                    .col(pk(DeviceInfos::Id))
                    .col(ColumnDef::new(DeviceInfos::Title).string_len(255).not_null())
                    .col(ColumnDef::new(DeviceInfos::Description).text().not_null())
                    .col(ColumnDef::new(DeviceInfos::DeviceId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_device_infos_device_id")
                            .from(DeviceInfos::Table, DeviceInfos::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
                DeviceInfos::CreatedAt,
                DeviceInfos::UpdatedAt,
            ))
            .await?;

        manager
            .create_table(timestamps(
                Table::create()
                    .table(DeviceImages::Table)
                    .if_not_exists()
                    .col(pk(DeviceImages::Id))
                    .col(ColumnDef::new(DeviceImages::Img).string_len(255).not_null())
                    .col(ColumnDef::new(DeviceImages::DeviceId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_device_images_device_id")
                            .from(DeviceImages::Table, DeviceImages::DeviceId)
                            .to(Devices::Table, Devices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
                DeviceImages::CreatedAt,
                DeviceImages::UpdatedAt,
            ))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DeviceImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DeviceInfos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Devices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TypeBrands::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Brands::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Types::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Types {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Brands {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TypeBrands {
    Table,
    Id,
    TypeId,
    BrandId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum Devices {
    Table,
    Id,
    Name,
    Price,
    OldPrice,
    Description,
    Rating,
    Img,
    TypeId,
    BrandId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DeviceInfos {
    Table,
    Id,
    Title,
    Description,
    DeviceId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DeviceImages {
    Table,
    Id,
    Img,
    DeviceId,
    CreatedAt,
    UpdatedAt,
}
