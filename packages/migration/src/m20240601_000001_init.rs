use sea_orm::Statement;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Maps {
    Table,
    Id,
    FullName,
    ShortName,
    CreatedAt,
}

#[derive(Iden)]
enum Rotations {
    Table,
    Id,
    Name,
    NameKey,
    IsRandom,
    LockVersion,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum RotationMaps {
    Table,
    Id,
    RotationId,
    MapId,
    Ordinal,
    IsNext,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum RotationMapHistory {
    Table,
    Id,
    RotationId,
    RotationMapId,
    Reason,
    SelectedAt,
}

#[derive(Iden)]
enum Queues {
    Table,
    Id,
    Name,
    NameKey,
    Size,
    RotationId,
    VoteThreshold,
    CreatedAt,
}

#[derive(Iden)]
enum InProgressGames {
    Table,
    Id,
    QueueId,
    MapFullName,
    MapShortName,
    FinishedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum InProgressGamePlayers {
    Table,
    Id,
    GameId,
    PlayerId,
    CreatedAt,
}

#[derive(Iden)]
enum MapVotes {
    Table,
    Id,
    ChannelId,
    PlayerId,
    RotationMapId,
    CreatedAt,
}

#[derive(Iden)]
enum SkipMapVotes {
    Table,
    Id,
    ChannelId,
    PlayerId,
    RotationId,
    InProgressGameId,
    CreatedAt,
}

#[derive(Iden)]
enum VotePassedWaitlists {
    Table,
    Id,
    ChannelId,
    GuildId,
    RotationId,
    EndWaitlistAt,
    CreatedAt,
}

fn pk(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn created_at(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // maps
        manager
            .create_table(
                Table::create()
                    .table(Maps::Table)
                    .if_not_exists()
                    .col(pk(Maps::Id))
                    .col(ColumnDef::new(Maps::FullName).string().not_null())
                    .col(ColumnDef::new(Maps::ShortName).string().not_null())
                    .col(created_at(Maps::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_maps_full_name")
                    .table(Maps::Table)
                    .col(Maps::FullName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // short names are stored upper-cased, so this is case-insensitive
        manager
            .create_index(
                Index::create()
                    .name("ux_maps_short_name")
                    .table(Maps::Table)
                    .col(Maps::ShortName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // rotations
        manager
            .create_table(
                Table::create()
                    .table(Rotations::Table)
                    .if_not_exists()
                    .col(pk(Rotations::Id))
                    .col(ColumnDef::new(Rotations::Name).string().not_null())
                    .col(ColumnDef::new(Rotations::NameKey).string().not_null())
                    .col(
                        ColumnDef::new(Rotations::IsRandom)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Rotations::LockVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(created_at(Rotations::CreatedAt))
                    .col(created_at(Rotations::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_rotations_name_key")
                    .table(Rotations::Table)
                    .col(Rotations::NameKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // rotation_maps
        manager
            .create_table(
                Table::create()
                    .table(RotationMaps::Table)
                    .if_not_exists()
                    .col(pk(RotationMaps::Id))
                    .col(
                        ColumnDef::new(RotationMaps::RotationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RotationMaps::MapId).big_integer().not_null())
                    .col(ColumnDef::new(RotationMaps::Ordinal).integer().not_null())
                    .col(
                        ColumnDef::new(RotationMaps::IsNext)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at(RotationMaps::CreatedAt))
                    .col(created_at(RotationMaps::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rotation_maps_rotation_id")
                            .from(RotationMaps::Table, RotationMaps::RotationId)
                            .to(Rotations::Table, Rotations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rotation_maps_map_id")
                            .from(RotationMaps::Table, RotationMaps::MapId)
                            .to(Maps::Table, Maps::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_rotation_maps_rotation_map")
                    .table(RotationMaps::Table)
                    .col(RotationMaps::RotationId)
                    .col(RotationMaps::MapId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_rotation_maps_rotation_ordinal")
                    .table(RotationMaps::Table)
                    .col(RotationMaps::RotationId)
                    .col(RotationMaps::Ordinal)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // At most one flagged row per rotation. Partial indexes are not
        // expressible through the index builder, and both backends accept this form.
        let backend = manager.get_database_backend();
        manager
            .get_connection()
            .execute(Statement::from_string(
                backend,
                "CREATE UNIQUE INDEX IF NOT EXISTS ux_rotation_maps_single_next \
                 ON rotation_maps (rotation_id) WHERE is_next",
            ))
            .await?;

        // rotation_map_history
        manager
            .create_table(
                Table::create()
                    .table(RotationMapHistory::Table)
                    .if_not_exists()
                    .col(pk(RotationMapHistory::Id))
                    .col(
                        ColumnDef::new(RotationMapHistory::RotationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RotationMapHistory::RotationMapId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RotationMapHistory::Reason)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(created_at(RotationMapHistory::SelectedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rotation_map_history_rotation_id")
                            .from(RotationMapHistory::Table, RotationMapHistory::RotationId)
                            .to(Rotations::Table, Rotations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rotation_map_history_rotation_map_id")
                            .from(
                                RotationMapHistory::Table,
                                RotationMapHistory::RotationMapId,
                            )
                            .to(RotationMaps::Table, RotationMaps::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_rotation_map_history_rotation_selected")
                    .table(RotationMapHistory::Table)
                    .col(RotationMapHistory::RotationId)
                    .col(RotationMapHistory::SelectedAt)
                    .to_owned(),
            )
            .await?;

        // queues
        manager
            .create_table(
                Table::create()
                    .table(Queues::Table)
                    .if_not_exists()
                    .col(pk(Queues::Id))
                    .col(ColumnDef::new(Queues::Name).string().not_null())
                    .col(ColumnDef::new(Queues::NameKey).string().not_null())
                    .col(ColumnDef::new(Queues::Size).integer().not_null())
                    .col(ColumnDef::new(Queues::RotationId).big_integer().null())
                    .col(ColumnDef::new(Queues::VoteThreshold).integer().null())
                    .col(created_at(Queues::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_queues_rotation_id")
                            .from(Queues::Table, Queues::RotationId)
                            .to(Rotations::Table, Rotations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_queues_name_key")
                    .table(Queues::Table)
                    .col(Queues::NameKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // in_progress_games
        manager
            .create_table(
                Table::create()
                    .table(InProgressGames::Table)
                    .if_not_exists()
                    .col(pk(InProgressGames::Id))
                    .col(
                        ColumnDef::new(InProgressGames::QueueId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InProgressGames::MapFullName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(InProgressGames::MapShortName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(InProgressGames::FinishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at(InProgressGames::CreatedAt))
                    .col(created_at(InProgressGames::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_in_progress_games_queue_id")
                            .from(InProgressGames::Table, InProgressGames::QueueId)
                            .to(Queues::Table, Queues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // in_progress_game_players
        manager
            .create_table(
                Table::create()
                    .table(InProgressGamePlayers::Table)
                    .if_not_exists()
                    .col(pk(InProgressGamePlayers::Id))
                    .col(
                        ColumnDef::new(InProgressGamePlayers::GameId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InProgressGamePlayers::PlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(created_at(InProgressGamePlayers::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_in_progress_game_players_game_id")
                            .from(InProgressGamePlayers::Table, InProgressGamePlayers::GameId)
                            .to(InProgressGames::Table, InProgressGames::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_in_progress_game_players_game_player")
                    .table(InProgressGamePlayers::Table)
                    .col(InProgressGamePlayers::GameId)
                    .col(InProgressGamePlayers::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_in_progress_game_players_player_id")
                    .table(InProgressGamePlayers::Table)
                    .col(InProgressGamePlayers::PlayerId)
                    .to_owned(),
            )
            .await?;

        // map_votes
        manager
            .create_table(
                Table::create()
                    .table(MapVotes::Table)
                    .if_not_exists()
                    .col(pk(MapVotes::Id))
                    .col(ColumnDef::new(MapVotes::ChannelId).big_integer().not_null())
                    .col(ColumnDef::new(MapVotes::PlayerId).big_integer().not_null())
                    .col(
                        ColumnDef::new(MapVotes::RotationMapId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(created_at(MapVotes::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_map_votes_rotation_map_id")
                            .from(MapVotes::Table, MapVotes::RotationMapId)
                            .to(RotationMaps::Table, RotationMaps::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_map_votes_player_rotation_map")
                    .table(MapVotes::Table)
                    .col(MapVotes::PlayerId)
                    .col(MapVotes::RotationMapId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // skip_map_votes
        manager
            .create_table(
                Table::create()
                    .table(SkipMapVotes::Table)
                    .if_not_exists()
                    .col(pk(SkipMapVotes::Id))
                    .col(
                        ColumnDef::new(SkipMapVotes::ChannelId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SkipMapVotes::PlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SkipMapVotes::RotationId).big_integer().null())
                    .col(
                        ColumnDef::new(SkipMapVotes::InProgressGameId)
                            .big_integer()
                            .null(),
                    )
                    .col(created_at(SkipMapVotes::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_skip_map_votes_rotation_id")
                            .from(SkipMapVotes::Table, SkipMapVotes::RotationId)
                            .to(Rotations::Table, Rotations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_skip_map_votes_in_progress_game_id")
                            .from(SkipMapVotes::Table, SkipMapVotes::InProgressGameId)
                            .to(InProgressGames::Table, InProgressGames::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_skip_map_votes_player_rotation")
                    .table(SkipMapVotes::Table)
                    .col(SkipMapVotes::PlayerId)
                    .col(SkipMapVotes::RotationId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_skip_map_votes_player_game")
                    .table(SkipMapVotes::Table)
                    .col(SkipMapVotes::PlayerId)
                    .col(SkipMapVotes::InProgressGameId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // vote_passed_waitlists
        manager
            .create_table(
                Table::create()
                    .table(VotePassedWaitlists::Table)
                    .if_not_exists()
                    .col(pk(VotePassedWaitlists::Id))
                    .col(
                        ColumnDef::new(VotePassedWaitlists::ChannelId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VotePassedWaitlists::GuildId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VotePassedWaitlists::RotationId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(VotePassedWaitlists::EndWaitlistAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(created_at(VotePassedWaitlists::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vote_passed_waitlists_rotation_id")
                            .from(VotePassedWaitlists::Table, VotePassedWaitlists::RotationId)
                            .to(Rotations::Table, Rotations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_vote_passed_waitlists_end_waitlist_at")
                    .table(VotePassedWaitlists::Table)
                    .col(VotePassedWaitlists::EndWaitlistAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse dependency order; indexes go with their tables
        manager
            .drop_table(
                Table::drop()
                    .table(VotePassedWaitlists::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(SkipMapVotes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MapVotes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(InProgressGamePlayers::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(InProgressGames::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Queues::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(RotationMapHistory::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(RotationMaps::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rotations::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Maps::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
