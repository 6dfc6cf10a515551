// ============================================================================
// World Clock
// Fixed-offset city clocks, time differences and flight arrival times
// ============================================================================

use crate::error::{CalcError, CalcResult};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Offset from UTC in whole minutes, within ±14 hours
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UtcOffset {
    minutes: i32,
}

impl UtcOffset {
    pub const UTC: UtcOffset = UtcOffset { minutes: 0 };

    const fn from_minutes_const(minutes: i32) -> Self {
        Self { minutes }
    }

    pub fn from_minutes(minutes: i32) -> CalcResult<Self> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(CalcError::invalid_input("offset", "must be within ±14 hours"));
        }
        Ok(Self { minutes })
    }

    /// Offset from fractional hours, e.g. `5.5` for India.
    pub fn from_hours(hours: f64) -> CalcResult<Self> {
        if !hours.is_finite() {
            return Err(CalcError::invalid_input("offset", "must be a finite number"));
        }
        let minutes = hours * 60.0;
        if (minutes - minutes.round()).abs() > 1e-9 {
            return Err(CalcError::invalid_input(
                "offset",
                "must be a whole number of minutes",
            ));
        }
        if minutes.abs() > f64::from(MAX_OFFSET_MINUTES) {
            return Err(CalcError::invalid_input("offset", "must be within ±14 hours"));
        }
        Self::from_minutes(minutes.round() as i32)
    }

    pub fn minutes(&self) -> i32 {
        self.minutes
    }

    pub fn hours(&self) -> f64 {
        f64::from(self.minutes) / 60.0
    }

    pub fn to_fixed_offset(&self) -> CalcResult<FixedOffset> {
        FixedOffset::east_opt(self.minutes * 60)
            .ok_or_else(|| CalcError::invalid_input("offset", "out of range"))
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minutes < 0 { '-' } else { '+' };
        write!(f, "UTC{}{}", sign, format_hours(self.minutes.abs()))
    }
}

/// `9` for whole hours, `5.5` otherwise
fn format_hours(minutes: i32) -> String {
    if minutes % 60 == 0 {
        (minutes / 60).to_string()
    } else {
        (f64::from(minutes) / 60.0).to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Region {
    Asia,
    Europe,
    Americas,
    Oceania,
}

impl Region {
    pub fn label(&self) -> &'static str {
        match self {
            Region::Asia => "아시아",
            Region::Europe => "유럽",
            Region::Americas => "미주",
            Region::Oceania => "오세아니아",
        }
    }
}

/// A city with its fixed offset as listed by the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct City {
    pub name: &'static str,
    pub country: &'static str,
    /// IANA zone identifier
    pub timezone: &'static str,
    pub region: Region,
    offset: UtcOffset,
}

const fn city(
    name: &'static str,
    country: &'static str,
    timezone: &'static str,
    region: Region,
    offset_minutes: i32,
) -> City {
    City {
        name,
        country,
        timezone,
        region,
        offset: UtcOffset::from_minutes_const(offset_minutes),
    }
}

pub static CITIES: [City; 27] = [
    city("서울", "대한민국", "Asia/Seoul", Region::Asia, 540),
    city("도쿄", "일본", "Asia/Tokyo", Region::Asia, 540),
    city("베이징", "중국", "Asia/Shanghai", Region::Asia, 480),
    city("홍콩", "중국", "Asia/Hong_Kong", Region::Asia, 480),
    city("싱가포르", "싱가포르", "Asia/Singapore", Region::Asia, 480),
    city("방콕", "태국", "Asia/Bangkok", Region::Asia, 420),
    city("하노이", "베트남", "Asia/Ho_Chi_Minh", Region::Asia, 420),
    city("델리", "인도", "Asia/Kolkata", Region::Asia, 330),
    city("두바이", "UAE", "Asia/Dubai", Region::Asia, 240),
    city("런던", "영국", "Europe/London", Region::Europe, 0),
    city("파리", "프랑스", "Europe/Paris", Region::Europe, 60),
    city("베를린", "독일", "Europe/Berlin", Region::Europe, 60),
    city("로마", "이탈리아", "Europe/Rome", Region::Europe, 60),
    city("마드리드", "스페인", "Europe/Madrid", Region::Europe, 60),
    city("암스테르담", "네덜란드", "Europe/Amsterdam", Region::Europe, 60),
    city("모스크바", "러시아", "Europe/Moscow", Region::Europe, 180),
    city("뉴욕", "미국", "America/New_York", Region::Americas, -300),
    city("로스앤젤레스", "미국", "America/Los_Angeles", Region::Americas, -480),
    city("시카고", "미국", "America/Chicago", Region::Americas, -360),
    city("라스베이거스", "미국", "America/Los_Angeles", Region::Americas, -480),
    city("샌프란시스코", "미국", "America/Los_Angeles", Region::Americas, -480),
    city("토론토", "캐나다", "America/Toronto", Region::Americas, -300),
    city("밴쿠버", "캐나다", "America/Vancouver", Region::Americas, -480),
    city("멕시코시티", "멕시코", "America/Mexico_City", Region::Americas, -360),
    city("시드니", "호주", "Australia/Sydney", Region::Oceania, 660),
    city("멜버른", "호주", "Australia/Melbourne", Region::Oceania, 660),
    city("오클랜드", "뉴질랜드", "Pacific/Auckland", Region::Oceania, 780),
];

impl City {
    /// Look a city up by its display name
    pub fn find(name: &str) -> Option<&'static City> {
        let name = name.trim();
        CITIES.iter().find(|c| c.name == name)
    }

    /// Home city every difference is described against
    pub fn seoul() -> &'static City {
        &CITIES[0]
    }

    pub fn in_region(region: Region) -> impl Iterator<Item = &'static City> {
        CITIES.iter().filter(move |c| c.region == region)
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.country, self.offset)
    }
}

/// Wall-clock time at `offset` for the instant `utc`
pub fn time_at_offset(utc: DateTime<Utc>, offset: UtcOffset) -> CalcResult<DateTime<FixedOffset>> {
    Ok(utc.with_timezone(&offset.to_fixed_offset()?))
}

pub fn time_in_city(utc: DateTime<Utc>, city: &City) -> CalcResult<DateTime<FixedOffset>> {
    time_at_offset(utc, city.offset)
}

/// Signed clock difference of one city relative to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeDifference {
    /// Positive when the other city's clock is ahead
    pub minutes: i32,
}

impl TimeDifference {
    pub fn hours(&self) -> f64 {
        f64::from(self.minutes) / 60.0
    }

    /// Korean description relative to `base_name`, e.g. `서울보다 14시간 느림`
    pub fn describe(&self, base_name: &str) -> String {
        match self.minutes {
            0 => "시차 없음".to_string(),
            m if m > 0 => format!("{base_name}보다 {}시간 빠름", format_hours(m)),
            m => format!("{base_name}보다 {}시간 느림", format_hours(-m)),
        }
    }
}

pub fn time_difference(base: &City, other: &City) -> TimeDifference {
    TimeDifference {
        minutes: other.offset.minutes - base.offset.minutes,
    }
}

/// Local arrival time in `destination` after a flight of the given length
pub fn arrival_time(
    departure: DateTime<Utc>,
    flight_hours: u32,
    flight_minutes: u32,
    destination: &City,
) -> CalcResult<DateTime<FixedOffset>> {
    let total = i64::from(flight_hours) * 60 + i64::from(flight_minutes);
    let arrival = departure
        .checked_add_signed(Duration::minutes(total))
        .ok_or_else(|| CalcError::invalid_input("flight_hours", "arrival time out of range"))?;
    time_in_city(arrival, destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_offset_from_fractional_hours() {
        assert_eq!(UtcOffset::from_hours(5.5).unwrap().minutes(), 330);
        assert_eq!(UtcOffset::from_hours(-8.0).unwrap().minutes(), -480);
        assert_eq!(UtcOffset::from_hours(5.75).unwrap().minutes(), 345);
        assert!(UtcOffset::from_hours(5.01).is_err());
        assert!(UtcOffset::from_hours(14.5).is_err());
        assert!(UtcOffset::from_hours(f64::NAN).is_err());
    }

    #[test]
    fn test_offset_display() {
        assert_eq!(UtcOffset::from_hours(5.5).unwrap().to_string(), "UTC+5.5");
        assert_eq!(UtcOffset::from_hours(-5.0).unwrap().to_string(), "UTC-5");
        assert_eq!(UtcOffset::UTC.to_string(), "UTC+0");
    }

    #[test]
    fn test_city_table() {
        assert_eq!(CITIES.len(), 27);
        assert_eq!(City::seoul().name, "서울");
        assert_eq!(City::find("델리").unwrap().offset().minutes(), 330);
        assert!(City::find("평양").is_none());
        assert_eq!(City::in_region(Region::Oceania).count(), 3);
        for c in CITIES.iter() {
            assert!(c.offset().minutes().abs() <= MAX_OFFSET_MINUTES);
        }
    }

    #[test]
    fn test_time_in_city() {
        let noon = utc(2024, 1, 1, 0, 0);
        let seoul = time_in_city(noon, City::seoul()).unwrap();
        assert_eq!(seoul.hour(), 9);

        let delhi = time_in_city(noon, City::find("델리").unwrap()).unwrap();
        assert_eq!((delhi.hour(), delhi.minute()), (5, 30));

        let la = time_in_city(noon, City::find("로스앤젤레스").unwrap()).unwrap();
        assert_eq!(la.date_naive().to_string(), "2023-12-31");
        assert_eq!(la.hour(), 16);
    }

    #[test]
    fn test_time_difference_description() {
        let seoul = City::seoul();
        let ny = City::find("뉴욕").unwrap();
        let diff = time_difference(seoul, ny);
        assert_eq!(diff.minutes, -14 * 60);
        assert_eq!(diff.describe(seoul.name), "서울보다 14시간 느림");

        let auckland = City::find("오클랜드").unwrap();
        assert_eq!(
            time_difference(seoul, auckland).describe(seoul.name),
            "서울보다 4시간 빠름"
        );
        assert_eq!(
            time_difference(seoul, City::find("델리").unwrap()).describe(seoul.name),
            "서울보다 3.5시간 느림"
        );
        assert_eq!(
            time_difference(seoul, City::find("도쿄").unwrap()).describe(seoul.name),
            "시차 없음"
        );
    }

    #[test]
    fn test_arrival_time() {
        let departure = utc(2024, 5, 1, 1, 0);
        let arrival = arrival_time(departure, 12, 30, City::find("뉴욕").unwrap()).unwrap();
        assert_eq!(arrival.date_naive().to_string(), "2024-05-01");
        assert_eq!((arrival.hour(), arrival.minute()), (8, 30));
    }
}
