//! Closed vocabularies shared by intake answers and directory listings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A fixed set of wire terms a field may take.
pub trait Vocabulary: Sized + Copy + 'static {
    /// Human name used in validation messages.
    const LABEL: &'static str;
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    /// Case-insensitive lookup; `-` and spaces are read as `_`.
    fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize_term(raw);
        Self::ALL
            .iter()
            .copied()
            .find(|term| term.as_str() == normalized)
    }

    fn accepted_terms() -> String {
        Self::ALL
            .iter()
            .map(|term| term.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn normalize_term(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|ch| match ch {
            '-' | ' ' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl Vocabulary for $name {
            const LABEL: &'static str = $label;
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

vocabulary! {
    /// Issue categories a seeker can name as their primary concern and
    /// providers tag themselves with.
    Concern, "concern" {
        Anxiety => "anxiety",
        Depression => "depression",
        Trauma => "trauma",
        Grief => "grief",
        Relationships => "relationships",
        SubstanceUse => "substance_use",
        EatingDisorders => "eating_disorders",
        Bipolar => "bipolar",
        Ocd => "ocd",
        Adhd => "adhd",
        Stress => "stress",
        LifeTransitions => "life_transitions",
    }
}

vocabulary! {
    HelpFor, "recipient" {
        Myself => "self",
        SomeoneElse => "someone_else",
    }
}

vocabulary! {
    /// Ordered from least to most severe.
    Urgency, "urgency" {
        Routine => "routine",
        Soon => "soon",
        Urgent => "urgent",
        Crisis => "crisis",
    }
}

vocabulary! {
    ServiceFormat, "service format" {
        InPerson => "in_person",
        Video => "video",
        Phone => "phone",
        Group => "group",
    }
}

vocabulary! {
    PaymentType, "payment type" {
        Insurance => "insurance",
        SelfPay => "self_pay",
        SlidingScale => "sliding_scale",
        Free => "free",
    }
}

vocabulary! {
    GenderPreference, "provider gender" {
        Female => "female",
        Male => "male",
        NonBinary => "non_binary",
    }
}

vocabulary! {
    Language, "language" {
        English => "english",
        Spanish => "spanish",
        French => "french",
        Mandarin => "mandarin",
        Korean => "korean",
        Amharic => "amharic",
        AmericanSignLanguage => "american_sign_language",
    }
}
