//! Fixture payload types.
//!
//! One [`SeedPayload`] is a full survey submission bundle: the submitting
//! user plus the four detail groups. The field names match the fixture JSON
//! and the database columns one-to-one.

use serde::{Deserialize, Serialize};

/// One survey submission bundle from the fixture file.
///
/// All five sub-objects are required; a fixture record missing any of them
/// fails loading for the whole collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPayload {
    pub user: UserPayload,
    pub personal_details: PersonalDetails,
    pub family_details: FamilyDetails,
    pub income_details: IncomeDetails,
    pub government_details: GovernmentDetails,
}

/// Submitting user. `email` is the natural key used for upserting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub gender: String,
    pub state: String,
    pub town: String,
    pub constituency_mla: String,
    pub mandal: String,
    pub constituency_mp: String,
    pub religion: String,
    pub age: i32,
    pub caste: String,
    pub ward: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyDetails {
    pub total_family_members: i32,
    pub total_earning_members: i32,
    pub occupation: String,
    pub no_of_children: i32,
    pub how_many_females: i32,
    pub how_many_males: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeDetails {
    pub how_many_earners: i32,
    pub saving_per_month: String,
    pub debt_range: String,
    pub interest_rate: f64,
    pub source_of_debt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernmentDetails {
    pub street_roads: String,
    pub town_village_roads: String,
    pub district_connecting_roads: String,
    pub transportation: String,
    pub government_hospitals: String,
    pub government_school_facilities: String,
    pub government_facilities_availability: String,
    pub will_you_vote_same_government: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAYLOAD: &str = r#"{
        "user": {
            "email": "a@x.com",
            "password_hash": "h1",
            "display_name": "Asha"
        },
        "personal_details": {
            "name": "Asha Rao",
            "address": "12 Main Rd",
            "phone": "9000000001",
            "gender": "female",
            "state": "Telangana",
            "town": "Siddipet",
            "constituency_mla": "Siddipet",
            "mandal": "Siddipet Urban",
            "constituency_mp": "Medak",
            "religion": "Hindu",
            "age": 34,
            "caste": "BC",
            "ward": "7"
        },
        "family_details": {
            "total_family_members": 5,
            "total_earning_members": 2,
            "occupation": "farming",
            "no_of_children": 2,
            "how_many_females": 3,
            "how_many_males": 2
        },
        "income_details": {
            "how_many_earners": 2,
            "saving_per_month": "1000-2000",
            "debt_range": "50000-100000",
            "interest_rate": 2.5,
            "source_of_debt": "bank"
        },
        "government_details": {
            "street_roads": "average",
            "town_village_roads": "good",
            "district_connecting_roads": "good",
            "transportation": "average",
            "government_hospitals": "poor",
            "government_school_facilities": "average",
            "government_facilities_availability": "average",
            "will_you_vote_same_government": true
        }
    }"#;

    #[test]
    fn parses_full_payload() {
        let payload: SeedPayload = serde_json::from_str(FULL_PAYLOAD).unwrap();
        assert_eq!(payload.user.email, "a@x.com");
        assert_eq!(payload.user.display_name.as_deref(), Some("Asha"));
        assert_eq!(payload.personal_details.age, 34);
        assert_eq!(payload.family_details.no_of_children, 2);
        assert_eq!(payload.income_details.interest_rate, 2.5);
        assert!(payload.government_details.will_you_vote_same_government);
    }

    #[test]
    fn display_name_is_optional() {
        let mut value: serde_json::Value = serde_json::from_str(FULL_PAYLOAD).unwrap();
        value["user"].as_object_mut().unwrap().remove("display_name");
        let payload: SeedPayload = serde_json::from_value(value).unwrap();
        assert_eq!(payload.user.display_name, None);
    }

    #[test]
    fn missing_detail_group_is_rejected() {
        let value: serde_json::Value = serde_json::from_str(FULL_PAYLOAD).unwrap();
        let mut map = value.as_object().unwrap().clone();
        map.remove("income_details");
        let truncated = serde_json::Value::Object(map).to_string();
        assert!(serde_json::from_str::<SeedPayload>(&truncated).is_err());
    }
}
