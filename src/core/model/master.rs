use serde::Serialize;
use uuid::Uuid;
use validify::Validify;

/// Master record for the `companies` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
}

/// Master record for the `racks` table. Racks are identified by their
/// storage code rather than a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rack {
    pub id: Uuid,
    pub code: String,
}

/// Master record for the `categories` table. The code feeds into file
/// reference generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub code: String,
}

/// DTO for inserting.
#[derive(Debug, Validify)]
pub struct CompanyInsert {
    #[modify(trim)]
    #[validate(length(min = 1, message = "Company name cannot be empty."))]
    pub name: String,
}

/// DTO for inserting.
#[derive(Debug, Validify)]
pub struct RackInsert {
    #[modify(trim, uppercase)]
    #[validate(length(min = 1, message = "Rack code cannot be empty."))]
    pub code: String,
}

/// DTO for inserting.
#[derive(Debug, Validify)]
pub struct CategoryInsert {
    #[modify(trim)]
    #[validate(length(min = 1, message = "Category name cannot be empty."))]
    pub name: String,

    #[modify(trim, uppercase)]
    #[validate(length(min = 1, message = "Category code cannot be empty."))]
    pub code: String,
}
