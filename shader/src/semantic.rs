//! Vertex attribute semantics.
//!
//! A semantic names the role an input attribute plays (position, normal,
//! texture coordinate, ...). Several attributes may share a role by carrying
//! different indices, so a [`SemanticId`] packs both into one integer:
//!
//! ```text
//! id = base_id(role) + index * Semantic::COUNT + 1
//! ```
//!
//! Id `0` is reserved for "no semantic".

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Role of a vertex input attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum Semantic {
    Color = 0,
    Position = 1,
    TexCoord = 2,
    Normal = 3,
    Binormal = 4,
    Tangent = 5,
    Fog = 6,
    BlendIndices = 7,
    BlendWeight = 8,
    PointSize = 9,
    TessFactor = 10,
}

impl Semantic {
    /// Number of known roles.
    pub const COUNT: u32 = 11;

    /// Every role, ordered by base id.
    pub const ALL: [Semantic; Semantic::COUNT as usize] = [
        Semantic::Color,
        Semantic::Position,
        Semantic::TexCoord,
        Semantic::Normal,
        Semantic::Binormal,
        Semantic::Tangent,
        Semantic::Fog,
        Semantic::BlendIndices,
        Semantic::BlendWeight,
        Semantic::PointSize,
        Semantic::TessFactor,
    ];

    /// Base id of this role, before index encoding.
    pub const fn base_id(self) -> u32 {
        self as u32
    }

    /// Name used in `// SEM <NAME>` comments.
    pub const fn name(self) -> &'static str {
        match self {
            Semantic::Color => "COLOR",
            Semantic::Position => "POSITION",
            Semantic::TexCoord => "TEXCOORD",
            Semantic::Normal => "NORMAL",
            Semantic::Binormal => "BINORMAL",
            Semantic::Tangent => "TANGENT",
            Semantic::Fog => "FOG",
            Semantic::BlendIndices => "BLENDINDICES",
            Semantic::BlendWeight => "BLENDWEIGHT",
            Semantic::PointSize => "PSIZE",
            Semantic::TessFactor => "TESSFACTOR",
        }
    }

    /// Role with the given base id.
    pub fn from_base_id(base_id: u32) -> Option<Self> {
        Self::ALL.get(base_id as usize).copied()
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Combined role and index of an attribute.
///
/// The default value is [`SemanticId::INVALID`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SemanticId(u32);

impl SemanticId {
    /// Sentinel for attributes without a recognized semantic comment.
    pub const INVALID: Self = Self(0);

    /// Encode a role and index.
    ///
    /// Returns `None` if the encoded id does not fit in a `u32`.
    pub fn new(role: Semantic, index: u32) -> Option<Self> {
        index
            .checked_mul(Semantic::COUNT)?
            .checked_add(role.base_id())?
            .checked_add(1)
            .map(Self)
    }

    /// The encoded integer.
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Decoded role, `None` for the invalid sentinel.
    pub fn role(self) -> Option<Semantic> {
        if !self.is_valid() {
            return None;
        }
        Semantic::from_base_id((self.0 - 1) % Semantic::COUNT)
    }

    /// Decoded index, `None` for the invalid sentinel.
    pub fn index(self) -> Option<u32> {
        self.is_valid().then(|| (self.0 - 1) / Semantic::COUNT)
    }
}

impl fmt::Display for SemanticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.role(), self.index()) {
            (Some(role), Some(index)) => write!(f, "{role}{index}"),
            _ => f.write_str("<invalid>"),
        }
    }
}

/// Lookup table from semantic names to roles.
///
/// Immutable once built. The standard table is constructed once per process
/// and shared; custom tables can add aliases for existing roles.
#[derive(Debug, Clone)]
pub struct SemanticTable {
    entries: HashMap<String, Semantic>,
}

impl SemanticTable {
    /// The shared table holding the canonical name of every role.
    pub fn standard() -> Arc<SemanticTable> {
        static STANDARD: OnceLock<Arc<SemanticTable>> = OnceLock::new();
        STANDARD
            .get_or_init(|| {
                log::debug!("Building standard semantic table");
                Arc::new(Self::from_entries(
                    Semantic::ALL.iter().map(|role| (role.name(), *role)),
                ))
            })
            .clone()
    }

    /// Build a table from `(name, role)` pairs.
    ///
    /// Names are unique: when a name repeats, the first entry wins.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Semantic)>,
        S: Into<String>,
    {
        let mut map = HashMap::new();
        for (name, role) in entries {
            let name = name.into();
            if let Some(existing) = map.get(&name) {
                log::warn!("Duplicate semantic name \"{name}\" ignored (already {existing})");
                continue;
            }
            map.insert(name, role);
        }
        Self { entries: map }
    }

    /// Role registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<Semantic> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stride between consecutive indices of one role in a [`SemanticId`].
    ///
    /// Always [`Semantic::COUNT`]: aliases add names, not roles, so they
    /// never change the encoding.
    pub const fn role_count(&self) -> u32 {
        Semantic::COUNT
    }
}

impl Default for SemanticTable {
    fn default() -> Self {
        Self::from_entries(Semantic::ALL.iter().map(|role| (role.name(), *role)))
    }
}
