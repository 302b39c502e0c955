use rosu_mods::{GameMod, GameModIntermode};
use rosu_pp::{model::mods::reexports::GameModsLegacy, GameMods};

pub trait Mods {
    fn hr(&self) -> bool;
    fn dt(&self) -> bool;
    fn ht(&self) -> bool;

    fn clock_rate(&self) -> f64 {
        if self.dt() {
            1.5
        } else if self.ht() {
            0.75
        } else {
            1.0
        }
    }

    fn reflection(&self) -> Reflection;
}

macro_rules! impl_has_mod {
    ( $( $fn:ident: $name:ident, )* ) => {
        impl Mods for GameMods {
            $(
                fn $fn(&self) -> bool {
                    match self {
                        Self::Lazer(ref mods) => {
                            mods.contains_intermode(GameModIntermode::$name)
                        },
                        Self::Intermode(ref mods) => {
                            mods.contains(GameModIntermode::$name)
                        },
                        Self::Legacy(mods) => mods.contains(GameModsLegacy::$name),
                    }
                }
            )*

            fn reflection(&self) -> Reflection {
                match self {
                    Self::Lazer(ref mods) => {
                        if mods.contains_intermode(GameModIntermode::HardRock) {
                            return Reflection::Vertical;
                        }

                        mods.iter()
                            .find_map(|m| match m {
                                GameMod::MirrorOsu(mr) => match mr.reflection.as_deref() {
                                    None | Some("0") => Some(Reflection::Horizontal),
                                    Some("1") => Some(Reflection::Vertical),
                                    Some("2") => Some(Reflection::Both),
                                    Some(_) => Some(Reflection::None),
                                },
                                _ => None,
                            })
                            .unwrap_or(Reflection::None)
                    }
                    Self::Intermode(ref mods) => {
                        if mods.contains(GameModIntermode::HardRock) {
                            Reflection::Vertical
                        } else {
                            Reflection::None
                        }
                    }
                    Self::Legacy(mods) => {
                        if mods.contains(GameModsLegacy::HardRock) {
                            Reflection::Vertical
                        } else {
                            Reflection::None
                        }
                    }
                }
            }
        }
    };
}

impl_has_mod! {
    hr: HardRock,
    dt: DoubleTime,
    ht: HalfTime,
}

/// How hit object positions are mirrored on the playfield.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Reflection {
    None,
    Vertical,
    Horizontal,
    Both,
}

impl Reflection {
    pub(crate) const fn flips_x(self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }

    pub(crate) const fn flips_y(self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }
}
