use nom::{
    AsChar, IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till, take_while_m_n},
    character::complete::{char, digit1, space0, space1},
    combinator::{eof, map, map_res, opt, value},
    error::ErrorKind,
    multi::separated_list1,
    sequence::{delimited, preceded},
};
use strsim::normalized_damerau_levenshtein;
use tracing::trace;

use crate::{
    condition::{CONDITION_CACHE, Category, Condition},
    course::CourseCode,
};

// Handbook text is typed by humans; keyword words tolerate typos up to
// this normalized Damerau-Levenshtein similarity.
const TYPO_MIN_SIMILARITY: f64 = 0.80;

fn is_colon_or_space(c: char) -> bool {
    c == ':' || c.is_ascii_whitespace()
}

fn is_space(c: char) -> bool {
    c.is_ascii_whitespace()
}

fn is_not_alpha(c: char) -> bool {
    !c.is_alpha()
}

/// Match a keyword word, tolerating misspellings.
///
/// Consumes up to the first `until` character and accepts when the consumed
/// text is close enough to `word`. Structural tokens (`and`, `or`, parens,
/// commas) stay exact; only descriptive keywords go through here.
fn typo_tag(word: &'static str, until: fn(char) -> bool) -> impl Fn(&str) -> IResult<&str, &str> {
    typo_tag_with_dist(word, TYPO_MIN_SIMILARITY, until)
}

fn typo_tag_with_dist(
    word: &'static str,
    min_similarity: f64,
    until: fn(char) -> bool,
) -> impl Fn(&str) -> IResult<&str, &str> {
    move |input: &str| {
        let (rest, parsed) = take_till(until).parse(input)?;
        if normalized_damerau_levenshtein(parsed, word) >= min_similarity {
            Ok((rest, parsed))
        } else {
            Err(nom::Err::Error(nom::error::Error::new(
                input,
                ErrorKind::Tag,
            )))
        }
    }
}

/// 4 letters + 4 digits, e.g. "comp1511".
fn course_code(input: &str) -> IResult<&str, CourseCode> {
    map(
        (
            take_while_m_n(4, 4, AsChar::is_alpha),
            take_while_m_n(4, 4, AsChar::is_dec_digit),
        ),
        |(faculty, number): (&str, &str)| CourseCode::new(format!("{faculty}{number}")),
    )
    .parse(input)
}

/// Bare 4-digit code whose faculty is implied by the target course.
fn implied_code(input: &str) -> IResult<&str, Condition> {
    map(take_while_m_n(4, 4, AsChar::is_dec_digit), |digits: &str| {
        Condition::ImpliedCourse(digits.to_string())
    })
    .parse(input)
}

fn level_category(input: &str) -> IResult<&str, Category> {
    map(
        (
            typo_tag("level", is_space),
            space1,
            map_res(digit1, str::parse::<u32>),
            space1,
            typo_tag("comp", is_not_alpha),
            space1,
            typo_tag("courses", is_not_alpha),
        ),
        |(_, _, level, ..)| Category::CompLevel(level),
    )
    .parse(input)
}

fn list_category(input: &str) -> IResult<&str, Category> {
    map(
        delimited(
            char('('),
            separated_list1((space0, char(','), space0), course_code),
            char(')'),
        ),
        Category::Courses,
    )
    .parse(input)
}

fn comp_category(input: &str) -> IResult<&str, Category> {
    map(
        (
            typo_tag("comp", is_not_alpha),
            space1,
            typo_tag("courses", is_not_alpha),
        ),
        |_| Category::Comp,
    )
    .parse(input)
}

fn category(input: &str) -> IResult<&str, Category> {
    alt((level_category, list_category, comp_category)).parse(input)
}

fn units_of_credit(input: &str) -> IResult<&str, Condition> {
    map(
        (
            opt((
                typo_tag("completion", is_space),
                space1,
                typo_tag("of", is_space),
            )),
            space0,
            map_res(digit1, str::parse::<u32>),
            space0,
            typo_tag("units", is_not_alpha),
            space1,
            // "of" is too short for the default threshold to admit any typo
            typo_tag_with_dist("of", 0.50, is_space),
            space1,
            typo_tag("credit", is_not_alpha),
            opt((space1, typo_tag("in", is_space), space1, category)),
        ),
        |(_, _, amount, _, _, _, _, _, _, cat)| Condition::Uoc {
            amount,
            category: cat.map(|(_, _, _, category)| category),
        },
    )
    .parse(input)
}

fn atom(input: &str) -> IResult<&str, Condition> {
    alt((
        units_of_credit,
        map(course_code, Condition::Course),
        delimited(
            char('('),
            delimited(space0, condition_expr, space0),
            char(')'),
        ),
        implied_code,
    ))
    .parse(input)
}

fn and_expr(input: &str) -> IResult<&str, Condition> {
    map(
        separated_list1((space1, tag("and"), space1), atom),
        |mut terms| match terms.len() {
            1 => terms.remove(0),
            _ => Condition::And(terms),
        },
    )
    .parse(input)
}

/// `and` binds tighter than `or`.
fn condition_expr(input: &str) -> IResult<&str, Condition> {
    map(
        separated_list1((space1, tag("or"), space1), and_expr),
        |mut terms| match terms.len() {
            1 => terms.remove(0),
            _ => Condition::Or(terms),
        },
    )
    .parse(input)
}

/// Optional "Prerequisite:" / "Prereq:" header, typos tolerated.
fn prereq_header(input: &str) -> IResult<&str, ()> {
    value(
        (),
        (
            opt(alt((
                typo_tag("prerequisite", is_colon_or_space),
                typo_tag("prereq", is_colon_or_space),
            ))),
            opt(char(':')),
            space0,
        ),
    )
    .parse(input)
}

/// Parse handbook-style condition text into a [`Condition`].
///
/// Input is lowercased and trimmed first; an empty condition (or a bare
/// header) means no prerequisite. Trailing unparsed text is an error.
pub fn parse(expr: &str) -> Result<Condition, String> {
    let normalized = expr.trim().to_ascii_lowercase();
    let result = preceded(
        prereq_header,
        alt((value(Condition::Empty, eof), condition_expr)),
    )
    .parse(normalized.as_str());

    match result {
        Ok(("", condition)) => Ok(condition),
        Ok((rest, _)) => Err(format!("unexpected trailing input: {rest}")),
        Err(e) => Err(format!("parse error: {e}")),
    }
}

/// Like [`parse`], but read-through cached on the raw condition text.
pub fn parse_cached(expr: &str) -> Result<Condition, String> {
    if let Some(condition) = CONDITION_CACHE.lock().get(expr) {
        trace!("condition cache hit");
        return Ok(condition.clone());
    }

    let condition = parse(expr)?;
    CONDITION_CACHE.lock().insert(expr.to_string(), condition.clone());

    Ok(condition)
}
