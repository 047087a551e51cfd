//! Serialization and deserialization for card types
//!
//! Wire format is `{"suit": "hearts", "value": "queen"}` with lowercase
//! suit names and rank values `"2"`..`"10"`, `"jack"`, `"queen"`,
//! `"king"`, `"ace"`.

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, Rank, Suit};

impl Serialize for Suit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Suit::ALL
            .into_iter()
            .find(|suit| suit.as_str() == s)
            .ok_or_else(|| D::Error::custom(format!("Invalid suit: {s}")))
    }
}

impl Serialize for Rank {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rank::ALL
            .into_iter()
            .find(|rank| rank.as_str() == s)
            .ok_or_else(|| D::Error::custom(format!("Invalid rank: {s}")))
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut st = serializer.serialize_struct("Card", 2)?;
        st.serialize_field("suit", &self.suit)?;
        st.serialize_field("value", &self.rank)?;
        st.end()
    }
}

#[derive(Deserialize)]
struct WireCard {
    suit: Suit,
    value: Rank,
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireCard::deserialize(deserializer)?;
        Ok(Card {
            suit: wire.suit,
            rank: wire.value,
        })
    }
}
