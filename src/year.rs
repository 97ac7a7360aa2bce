use nom::{
    bytes::complete::{tag, take_while_m_n},
    character::complete::{char, space0, space1},
    combinator::{all_consuming, map_res, opt},
    sequence::{delimited, preceded, tuple},
    IResult,
};

use crate::error::{FigureError, Result};

fn four_digits(input: &str) -> IResult<&str, i32> {
    map_res(take_while_m_n(4, 4, |c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<i32>()
    })(input)
}

// World Bank bulk downloads label columns as `1990 [YR1990]`.
fn bulk_suffix(input: &str) -> IResult<&str, i32> {
    preceded(space1, delimited(tuple((char('['), tag("YR"))), four_digits, char(']')))(input)
}

fn year_label(input: &str) -> IResult<&str, (i32, Option<i32>)> {
    delimited(space0, tuple((four_digits, opt(bulk_suffix))), space0)(input)
}

/// Parse a year column label into its year.
pub fn parse_year_label(label: &str) -> Result<i32> {
    match all_consuming(year_label)(label) {
        Ok((_, (year, None))) => Ok(year),
        Ok((_, (year, Some(bulk)))) if bulk == year => Ok(year),
        _ => Err(FigureError::MalformedYear(label.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_year() {
        assert_eq!(parse_year_label("1990").unwrap(), 1990);
        assert_eq!(parse_year_label(" 2010 ").unwrap(), 2010);
    }

    #[test]
    fn test_bulk_download_label() {
        assert_eq!(parse_year_label("2000 [YR2000]").unwrap(), 2000);
        assert!(parse_year_label("2000 [YR2001]").is_err());
    }

    #[test]
    fn test_malformed_labels() {
        for label in ["", "199", "19900", "year", "1990a", "1990-01-01"] {
            let err = parse_year_label(label).unwrap_err();
            assert!(matches!(err, FigureError::MalformedYear(_)), "{label}");
        }
    }
}
