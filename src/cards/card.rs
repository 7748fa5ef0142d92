use serde::Deserialize;
use serde::Serialize;

/// Opaque card identity. Unique within one game, immutable for its
/// lifetime, assigned densely at deck build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(u32);

impl From<u32> for CardId {
    fn from(n: u32) -> Self {
        Self(n)
    }
}
impl From<CardId> for u32 {
    fn from(id: CardId) -> u32 {
        id.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Card kinds. The five cat variants are distinct kinds so that the
/// five-distinct-cats combo falls out of plain equality checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Bomb,
    Defuse,
    Skip,
    Attack,
    Shuffle,
    PeekFuture,
    Counter,
    Favor,
    TacoCat,
    BeardCat,
    RainbowCat,
    PotatoCat,
    MelonCat,
}

impl CardKind {
    pub const CATS: [CardKind; 5] = [
        CardKind::TacoCat,
        CardKind::BeardCat,
        CardKind::RainbowCat,
        CardKind::PotatoCat,
        CardKind::MelonCat,
    ];
    pub fn is_cat(&self) -> bool {
        Self::CATS.contains(self)
    }
    /// Kinds eligible for the same-kind pair combo. Bombs never rest in a
    /// hand and defuses are too valuable to be a combo by rule.
    pub fn is_pairable(&self) -> bool {
        !matches!(self, CardKind::Bomb | CardKind::Defuse)
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            CardKind::Bomb => "bomb",
            CardKind::Defuse => "defuse",
            CardKind::Skip => "skip",
            CardKind::Attack => "attack",
            CardKind::Shuffle => "shuffle",
            CardKind::PeekFuture => "peek-future",
            CardKind::Counter => "counter",
            CardKind::Favor => "favor",
            CardKind::TacoCat => "taco-cat",
            CardKind::BeardCat => "beard-cat",
            CardKind::RainbowCat => "rainbow-cat",
            CardKind::PotatoCat => "potato-cat",
            CardKind::MelonCat => "melon-cat",
        };
        write!(f, "{}", name)
    }
}

/// A card: stable identity plus immutable kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    kind: CardKind,
}

impl Card {
    pub fn new(id: CardId, kind: CardKind) -> Self {
        Self { id, kind }
    }
    pub fn id(&self) -> CardId {
        self.id
    }
    pub fn kind(&self) -> CardKind {
        self.kind
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.kind, self.id)
    }
}
