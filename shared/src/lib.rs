use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Builds a record id in the format "<kind>::<uuid-v4>"
fn generate_record_id(kind: &str) -> String {
    format!("{}::{}", kind, Uuid::new_v4())
}

/// A household grouping members under one account owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    pub id: String,
    pub name: String,
    /// Identity subject of the primary account holder
    pub owner_id: String,
    /// Epoch millis
    pub created_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Parent,
    Child,
}

/// An individual (adult or child) whose health is tracked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: String,
    pub family_id: String,
    /// Identity subject for adults, None for children
    pub user_id: Option<String>,
    pub name: String,
    /// ISO 8601 date (YYYY-MM-DD)
    pub date_of_birth: Option<String>,
    pub is_child: bool,
    pub avatar_emoji: Option<String>,
    pub role: MemberRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BowelQuality {
    Solid,
    Loose,
    Diarrhea,
    Constipated,
}

/// One day's wellness snapshot for one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEntry {
    pub id: String,
    pub family_member_id: String,
    /// ISO 8601 date (YYYY-MM-DD)
    pub date: String,
    pub mood: Option<i32>,
    pub energy: Option<i32>,
    pub inflammation: Option<i32>,
    /// Count for the day
    pub bowel_movements: Option<i32>,
    pub bowel_quality: Option<BowelQuality>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
    /// Identity subject of whoever logged it (a parent for children)
    pub logged_by: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: String,
    pub health_entry_id: String,
    pub family_member_id: String,
    pub date: String,
    pub meal_type: MealType,
    pub description: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitaminEntry {
    pub id: String,
    pub health_entry_id: String,
    pub family_member_id: String,
    pub date: String,
    pub vitamin_name: String,
    pub dosage: Option<String>,
    /// false when the dose was skipped
    pub taken: bool,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationEntry {
    pub id: String,
    pub health_entry_id: String,
    pub family_member_id: String,
    pub date: String,
    pub medication_name: String,
    pub dosage: String,
    pub taken: bool,
    pub timestamp: i64,
    /// "HH:MM"
    pub scheduled_time: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicationFrequency {
    Daily,
    TwiceDaily,
    Weekly,
    AsNeeded,
}

/// Recurring medication reminder rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationSchedule {
    pub id: String,
    pub family_member_id: String,
    pub medication_name: String,
    pub dosage: String,
    pub frequency: MedicationFrequency,
    /// "HH:MM" values, e.g. ["08:00", "20:00"] for twice daily
    pub times: Vec<String>,
    pub active: bool,
    pub start_date: String,
    pub end_date: Option<String>,
    pub reminder_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    Correlation,
    Pattern,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Precomputed analytics finding for a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub family_member_id: String,
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    /// 0.0 to 1.0
    pub confidence: f64,
    /// Number of entries analyzed
    pub data_points: i64,
    pub date_range: DateRange,
    pub dismissed: bool,
    pub created_at: i64,
}

// ---------------------------------------------------------------------------
// Requests and responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyBootstrapResponse {
    pub family: Family,
    /// May be absent when the family exists but the caller's member does not
    pub member: Option<FamilyMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MyMemberResponse {
    pub member: Option<FamilyMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMemberListResponse {
    pub members: Vec<FamilyMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateChildMemberRequest {
    pub name: String,
    pub date_of_birth: Option<String>,
    pub avatar_emoji: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMemberResponse {
    pub member: FamilyMember,
    pub success_message: String,
}

/// Body of PUT /api/entries. Absent metrics clear the stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertHealthEntryRequest {
    pub family_member_id: String,
    pub date: String,
    #[serde(default)]
    pub mood: Option<i32>,
    #[serde(default)]
    pub energy: Option<i32>,
    #[serde(default)]
    pub inflammation: Option<i32>,
    #[serde(default)]
    pub bowel_movements: Option<i32>,
    #[serde(default)]
    pub bowel_quality: Option<BowelQuality>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertHealthEntryResponse {
    pub entry_id: String,
    pub entry: HealthEntry,
    /// true when a new record was inserted
    pub created: bool,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEntryResponse {
    pub entry: Option<HealthEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEntryListResponse {
    pub entries: Vec<HealthEntry>,
}

/// A health entry formatted for the timeline view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineDay {
    pub entry_id: String,
    pub date: String,
    /// e.g. "Friday, Feb 13, 2026"
    pub formatted_date: String,
    /// e.g. "7/10 🙂"
    pub mood: Option<String>,
    pub energy: Option<String>,
    pub inflammation: Option<String>,
    /// e.g. "2 (solid)"
    pub bowel: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineResponse {
    pub days: Vec<TimelineDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogFoodRequest {
    pub meal_type: MealType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogVitaminRequest {
    pub vitamin_name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    pub taken: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMedicationRequest {
    pub medication_name: String,
    pub dosage: String,
    pub taken: bool,
    #[serde(default)]
    pub scheduled_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeListResponse {
    pub foods: Vec<FoodEntry>,
    pub vitamins: Vec<VitaminEntry>,
    pub medications: Vec<MedicationEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMedicationScheduleRequest {
    pub medication_name: String,
    pub dosage: String,
    pub frequency: MedicationFrequency,
    pub times: Vec<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    pub reminder_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationScheduleListResponse {
    pub schedules: Vec<MedicationSchedule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordInsightRequest {
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    pub confidence: f64,
    pub data_points: i64,
    pub date_range: DateRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightListResponse {
    pub insights: Vec<Insight>,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Id generation and string codecs
// ---------------------------------------------------------------------------

impl Family {
    pub fn generate_id() -> String {
        generate_record_id("family")
    }
}

impl FamilyMember {
    pub fn generate_id() -> String {
        generate_record_id("member")
    }
}

impl HealthEntry {
    pub fn generate_id() -> String {
        generate_record_id("entry")
    }
}

impl FoodEntry {
    pub fn generate_id() -> String {
        generate_record_id("food")
    }
}

impl VitaminEntry {
    pub fn generate_id() -> String {
        generate_record_id("vitamin")
    }
}

impl MedicationEntry {
    pub fn generate_id() -> String {
        generate_record_id("medication")
    }
}

impl MedicationSchedule {
    pub fn generate_id() -> String {
        generate_record_id("schedule")
    }
}

impl Insight {
    pub fn generate_id() -> String {
        generate_record_id("insight")
    }
}

/// Error returned when a stored enum column holds an unknown value
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownVariantError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown {} value: {}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariantError {}

/// Implements `as_str`, `Display` and `FromStr` using the snake_case names
/// that serde also uses on the wire.
macro_rules! string_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariantError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    other => Err(UnknownVariantError {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

string_enum!(MemberRole, "role", {
    Parent => "parent",
    Child => "child",
});

string_enum!(BowelQuality, "bowel quality", {
    Solid => "solid",
    Loose => "loose",
    Diarrhea => "diarrhea",
    Constipated => "constipated",
});

string_enum!(MealType, "meal type", {
    Breakfast => "breakfast",
    Lunch => "lunch",
    Dinner => "dinner",
    Snack => "snack",
});

string_enum!(MedicationFrequency, "frequency", {
    Daily => "daily",
    TwiceDaily => "twice_daily",
    Weekly => "weekly",
    AsNeeded => "as_needed",
});

string_enum!(InsightType, "insight type", {
    Correlation => "correlation",
    Pattern => "pattern",
    Alert => "alert",
});
