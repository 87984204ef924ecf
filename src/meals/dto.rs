use serde::{Deserialize, Serialize};

/// Meal-type code the API uses for lunch.
pub const LUNCH_CODE: &str = "2";

/// Status block returned by the API in place of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResult {
    pub code: String,
    pub message: String,
}

/// One meal service (breakfast, lunch or dinner) for the queried date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MealRow {
    pub meal_type_code: String,
    pub meal_type_name: String,
    /// `YYYYMMDD`
    pub date: String,
    pub dish_field: String,
    pub calorie_info: String,
    pub nutrition_info: String,
}

impl MealRow {
    pub fn is_lunch(&self) -> bool {
        self.meal_type_code == LUNCH_CODE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedResponse {
    pub result: Option<ApiResult>,
    pub rows: Vec<MealRow>,
}

pub type DishList = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lunch {
    pub dishes: DishList,
    pub calories: String,
    pub nutrition: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MealOutcome {
    Served {
        date: String,
        display_date: String,
        lunch: Option<Lunch>,
        rows: Vec<MealRow>,
    },
    NoData {
        date: String,
        display_date: String,
        result: Option<ApiResult>,
    },
}

#[derive(Debug, Deserialize)]
pub struct MealQuery {
    pub date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MealStatus {
    Served,
    NoData,
}

#[derive(Debug, Serialize)]
pub struct MealInfoResponse {
    pub status: MealStatus,
    pub date: String,
    pub display_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch: Option<Lunch>,
    pub rows: Vec<MealRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ApiResult>,
}

impl From<MealOutcome> for MealInfoResponse {
    fn from(outcome: MealOutcome) -> Self {
        match outcome {
            MealOutcome::Served { date, display_date, lunch, rows } => Self {
                status: MealStatus::Served,
                date,
                display_date,
                lunch,
                rows,
                result: None,
            },
            MealOutcome::NoData { date, display_date, result } => Self {
                status: MealStatus::NoData,
                date,
                display_date,
                lunch: None,
                rows: Vec::new(),
                result,
            },
        }
    }
}
