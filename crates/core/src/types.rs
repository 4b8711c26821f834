/// All entity identifiers are UUIDs minted by the application, never by the database.
pub type DbId = uuid::Uuid;

/// Organization identifiers scope every tenant-owned row.
pub type OrgId = uuid::Uuid;
