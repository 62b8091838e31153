//! Character preference vocabulary
//!
//! Each preference category is a closed set of choices. Labels are parsed
//! leniently: an unknown or empty label resolves to the category default, so a
//! generation request is never rejected because of an unrecognized choice.
//! Both the English slug (`sky-blue`) and the Chinese label shown in the app
//! (`天空蓝`) are accepted.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident {
            $($variant:ident => ($slug:literal, $label:literal, $phrase:literal),)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "serde_json::Value", into = "String")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn slug(self) -> &'static str {
                match self {
                    $($name::$variant => $slug,)+
                }
            }

            /// Label as presented in the app UI.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Descriptive English phrase substituted into the prompt.
            pub fn phrase(self) -> &'static str {
                match self {
                    $($name::$variant => $phrase,)+
                }
            }

            /// Resolve a slug or UI label, falling back to the default choice.
            pub fn from_label(label: &str) -> Self {
                let label = label.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.slug().eq_ignore_ascii_case(label) || choice.label() == label)
                    .unwrap_or_default()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl From<String> for $name {
            fn from(label: String) -> Self {
                Self::from_label(&label)
            }
        }

        /// Non-string JSON values (`null`, numbers, ...) resolve to the default.
        impl From<serde_json::Value> for $name {
            fn from(value: serde_json::Value) -> Self {
                match value {
                    serde_json::Value::String(label) => Self::from_label(&label),
                    _ => Self::default(),
                }
            }
        }

        impl From<$name> for String {
            fn from(choice: $name) -> Self {
                choice.slug().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.slug())
            }
        }
    };
}

vocabulary! {
    /// Fur color theme.
    Color, default = WarmPink {
        WarmPink => ("warm-pink", "温暖粉", "soft pastel pink fur, rose-colored aesthetic"),
        SkyBlue => ("sky-blue", "天空蓝", "light sky blue fur, serene blue atmosphere"),
        MintGreen => ("mint-green", "薄荷绿", "mint green fur, fresh green ambiance"),
        CreamYellow => ("cream-yellow", "奶油黄", "cream yellow fur, warm golden glow"),
        LavenderPurple => ("lavender-purple", "薰衣草紫", "lavender purple fur, gentle purple tones"),
        CoralOrange => ("coral-orange", "珊瑚橙", "coral orange fur, warm peachy atmosphere"),
        PureWhite => ("pure-white", "纯白", "pure white fur, clean minimalist aesthetic"),
        LightGray => ("light-gray", "浅灰", "light gray fur, soft neutral tones"),
    }
}

vocabulary! {
    /// Temperament, rendered through eyes, posture and expression.
    Personality, default = Gentle {
        Lively => ("lively", "活泼", "big curious eyes, dynamic paw gesture, energetic aura, playful expression"),
        Gentle => ("gentle", "温柔", "soft gentle eyes, calm posture, peaceful expression, caring demeanor"),
        Clever => ("clever", "聪明", "intelligent eyes, thoughtful expression, wise appearance, attentive look"),
        Lazy => ("lazy", "慵懒", "relaxed eyes, lounging posture, comfortable expression, laid-back vibe"),
        Brave => ("brave", "勇敢", "confident eyes, strong posture, determined expression, courageous stance"),
        Shy => ("shy", "害羞", "shy eyes, timid posture, gentle expression, reserved demeanor"),
    }
}

vocabulary! {
    /// Accessory worn by the character.
    Appearance, default = NoAccessory {
        Glasses => ("glasses", "戴眼镜", "wearing tiny round glasses, scholarly look"),
        Hat => ("hat", "戴帽子", "wearing a cute small hat, fashionable style"),
        Scarf => ("scarf", "戴围巾", "wearing a cozy scarf, warm appearance"),
        BowTie => ("bow-tie", "戴蝴蝶结", "wearing a cute bow tie, elegant look"),
        NoAccessory => ("none", "无配饰", "natural appearance, simple and pure"),
    }
}

vocabulary! {
    /// Relationship the character has with the user.
    Role, default = Companion {
        Companion => ("companion", "陪伴式朋友", "friendly companion, approachable and warm"),
        CaringElder => ("caring-elder", "温柔照顾型长辈", "caring elder figure, nurturing and protective"),
        Mentor => ("mentor", "引导型老师", "wise teacher figure, knowledgeable and patient"),
    }
}

/// The four choices a user makes when designing their character.
///
/// Missing fields deserialize to the category default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub color: Color,
    pub personality: Personality,
    pub appearance: Appearance,
    pub role: Role,
}

impl Preferences {
    pub fn new(color: Color, personality: Personality, appearance: Appearance, role: Role) -> Self {
        Self {
            color,
            personality,
            appearance,
            role,
        }
    }

    pub fn from_labels(color: &str, personality: &str, appearance: &str, role: &str) -> Self {
        Self {
            color: Color::from_label(color),
            personality: Personality::from_label(personality),
            appearance: Appearance::from_label(appearance),
            role: Role::from_label(role),
        }
    }

    pub fn prompt(&self) -> String {
        crate::prompts::render_portrait(self)
    }
}
