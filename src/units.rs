use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd)]
pub struct Meters(pub f64);

impl FromStr for Meters {
    type Err = std::num::ParseFloatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Meters(s.trim().parse()?))
    }
}

impl Display for Meters {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:.0} m", self.0)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Kilometers(pub f64);

impl From<Meters> for Kilometers {
    fn from(m: Meters) -> Self {
        Kilometers(m.0 / 1000.)
    }
}

impl Display for Kilometers {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:.2} km", self.0)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Feet(pub Meters);

impl Display for Feet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:.0} ft", (self.0).0 * 3.2808399)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Miles(pub Meters);

impl Display for Miles {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:.2} mi", (self.0).0 * 0.00062137119)
    }
}
