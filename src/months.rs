//! Calendar months and their display names.
//!
//! [`Month::ALL`] is ordered so that `ALL[n - 1]` is calendar month `n`:
//! index 0 is January and index 11 is December. Lookups go through
//! [`Month::from_number`], which rejects anything outside `1..=12` instead of
//! indexing out of range.

use std::fmt;

use crate::error::MonthOutOfRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn from_number(number: u32) -> Result<Self, MonthOutOfRange> {
        match number {
            1..=12 => Ok(Self::ALL[(number - 1) as usize]),
            _ => Err(MonthOutOfRange(number)),
        }
    }

    pub fn number(self) -> u32 {
        self as u32
    }

    /// Brazilian Portuguese name, capitalized.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "Janeiro",
            Month::February => "Fevereiro",
            Month::March => "Março",
            Month::April => "Abril",
            Month::May => "Maio",
            Month::June => "Junho",
            Month::July => "Julho",
            Month::August => "Agosto",
            Month::September => "Setembro",
            Month::October => "Outubro",
            Month::November => "Novembro",
            Month::December => "Dezembro",
        }
    }
}

impl TryFrom<u32> for Month {
    type Error = MonthOutOfRange;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        Month::from_number(number)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
