//! Species tags carried by cross-section records.
//!
//! The integer code of each species is its position in the list below and is
//! what crosses the C boundary. The short name is what XML files store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NativeError;

macro_rules! species {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Atmospheric species tag.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[repr(i64)]
        pub enum Species {
            #[default]
            $($variant,)+
        }

        impl Species {
            pub const ALL: &'static [Species] = &[$(Species::$variant,)+];

            /// Short name as stored in XML files.
            pub fn name(self) -> &'static str {
                match self {
                    $(Species::$variant => $name,)+
                }
            }
        }
    };
}

species! {
    Bath => "AIR",
    Water => "H2O",
    CarbonDioxide => "CO2",
    Ozone => "O3",
    NitrogenOxide => "N2O",
    CarbonMonoxide => "CO",
    Methane => "CH4",
    Oxygen => "O2",
    NitricOxide => "NO",
    SulfurDioxide => "SO2",
    NitrogenDioxide => "NO2",
    Ammonia => "NH3",
    NitricAcid => "HNO3",
    Hydroxyl => "OH",
    HydrogenFluoride => "HF",
    HydrogenChloride => "HCl",
    HydrogenBromide => "HBr",
    ChlorineMonoxide => "ClO",
    CarbonylSulfide => "OCS",
    Formaldehyde => "H2CO",
    Nitrogen => "N2",
    HydrogenCyanide => "HCN",
    Chloromethane => "CH3Cl",
    Ethyne => "C2H2",
    Ethane => "C2H6",
    SulfurHexafluoride => "SF6",
    HydrogenSulfide => "H2S",
    ChlorineNitrate => "ClONO2",
    CarbonTetrachloride => "CCl4",
    CarbonTetrafluoride => "CF4",
    Hexafluoroethane => "C2F6",
    Octafluoropropane => "C3F8",
    NitrogenTrifluoride => "NF3",
    Dichloromethane => "CH2Cl2",
    CFC11 => "CFC11",
    CFC12 => "CFC12",
    CFC113 => "CFC113",
    CFC114 => "CFC114",
    CFC115 => "CFC115",
    HCFC22 => "HCFC22",
    HCFC141b => "HCFC141b",
    HCFC142b => "HCFC142b",
    HFC23 => "HFC23",
    HFC32 => "HFC32",
    HFC125 => "HFC125",
    HFC134a => "HFC134a",
    HFC143a => "HFC143a",
    HFC152a => "HFC152a",
    HFC227ea => "HFC227ea",
    HFC236fa => "HFC236fa",
    Halon1211 => "Halon1211",
    Halon1301 => "Halon1301",
    Halon2402 => "Halon2402",
    FreeElectrons => "free_electrons",
    Particles => "particles",
}

impl Species {
    /// Integer code used at the C boundary.
    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn from_code(code: i64) -> Result<Self, NativeError> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| NativeError::InvalidArgument(format!("unknown species code {code}")))
    }
}

impl FromStr for Species {
    type Err = NativeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|species| species.name() == s)
            .ok_or_else(|| NativeError::InvalidArgument(format!("unknown species \"{s}\"")))
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_positions() {
        for (i, species) in Species::ALL.iter().enumerate() {
            assert_eq!(species.code(), i as i64);
            assert_eq!(Species::from_code(i as i64).unwrap(), *species);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(Species::from_code(-1).is_err());
        assert!(Species::from_code(Species::ALL.len() as i64).is_err());
    }

    #[test]
    fn names_parse_back() {
        assert_eq!("CFC11".parse::<Species>().unwrap(), Species::CFC11);
        assert_eq!("H2O".parse::<Species>().unwrap(), Species::Water);
        assert!("Unobtainium".parse::<Species>().is_err());
        assert_eq!(Species::default(), Species::Bath);
    }
}
