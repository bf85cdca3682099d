use alloc::{string::String, vec::Vec};
use core::fmt::{self, Formatter};
use serde::{
    de::{value::MapAccessDeserializer, Error, MapAccess, Unexpected, Visitor},
    Deserialize, Deserializer,
};

#[derive(Debug, Deserialize)]
pub struct Search {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

/// Category selection as sent by the quiz client. An `id` of zero means all categories.
#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    /// Clients key categories by their identifier, so it may arrive as a decimal string.
    #[serde(deserialize_with = "deserialize_category_id")]
    pub id: i32,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Quiz {
    #[serde(deserialize_with = "deserialize_quiz_category")]
    pub quiz_category: QuizCategory,
    /// Every question identifier already shown in this session.
    pub previous_questions: Vec<i32>,
}

struct CategoryIdVisitor;

impl<'de> Visitor<'de> for CategoryIdVisitor {
    type Value = i32;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a category identifier as a number or a decimal string")
    }

    fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
        i32::try_from(value).map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
    }

    fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
        i32::try_from(value).map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
        value.parse().map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
    }
}

fn deserialize_category_id<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(CategoryIdVisitor)
}

struct QuizCategoryVisitor;

impl<'de> Visitor<'de> for QuizCategoryVisitor {
    type Value = QuizCategory;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a quiz category object")
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        QuizCategory::deserialize(MapAccessDeserializer::new(map))
    }
}

/// Object form only. Sequences such as `[5]` are rejected.
fn deserialize_quiz_category<'de, D>(deserializer: D) -> Result<QuizCategory, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_map(QuizCategoryVisitor)
}

impl QuizCategory {
    /// Returns the category filter, or `None` for "all categories".
    pub const fn filter(&self) -> Option<i32> {
        if self.id == 0 {
            None
        } else {
            Some(self.id)
        }
    }
}
