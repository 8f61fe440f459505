//! Tests for filter evaluation.

use chrono::NaiveDate;
use todotxt_model_rs::models::Item;

use super::*;

// ==================== Test Helpers ====================

const FIXTURE: [&str; 6] = [
    "(C) 2015-11-05 Foo @Context2 Not@Context +Project1 Not+Project",
    "(D) Bar @Context1 +Project2 p:1",
    "(C) Baz @Context1 +Project1 key:value id:1",
    "(C) Drink beer @ home",
    "(C) 13 + 29 = 42",
    "x 2014-12-12 Completed but with date:2014-12-12",
];

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
}

fn make_item(line: &str) -> Item {
    Item::parse(line).unwrap()
}

fn fixture() -> Vec<Item> {
    FIXTURE.iter().map(|line| make_item(line)).collect()
}

/// Returns the 1-based fixture positions matching a query.
fn matching(query: &str) -> Vec<usize> {
    let filter = compile_with_today(query, today()).unwrap();
    fixture()
        .iter()
        .enumerate()
        .filter(|(_, item)| evaluate(&filter, item))
        .map(|(idx, _)| idx + 1)
        .collect()
}

// ==================== Atom Tests ====================

#[test]
fn test_text_is_case_insensitive_substring() {
    assert_eq!(matching("beer"), vec![4]);
    assert_eq!(matching("BEER"), vec![4]);
    assert_eq!(matching("foo"), vec![1]);
}

#[test]
fn test_text_matches_unicode_by_code_point() {
    let item = make_item("Buy Stra\u{df}enbahn ticket \u{25c4}");
    assert!(evaluate(&compile("\u{df}en").unwrap(), &item));
    assert!(evaluate(&compile("\u{25c4}").unwrap(), &item));
    assert!(!evaluate(&compile("\u{25ba}").unwrap(), &item));
}

#[test]
fn test_context_is_exact() {
    assert_eq!(matching("@Context1"), vec![2, 3]);
    assert_eq!(matching("@Context2"), vec![1]);
    assert_eq!(matching("@Context"), Vec::<usize>::new());
}

#[test]
fn test_bare_sigils_match_nothing() {
    assert_eq!(matching("@"), Vec::<usize>::new());
    assert_eq!(matching("+"), Vec::<usize>::new());
}

#[test]
fn test_project() {
    assert_eq!(matching("+Project1"), vec![1, 3]);
    assert_eq!(matching("-+Project1"), vec![2, 4, 5, 6]);
}

#[test]
fn test_tags() {
    assert_eq!(matching("key:value"), vec![3]);
    assert_eq!(matching("id:"), vec![3]);
    assert_eq!(matching("key:other"), Vec::<usize>::new());
    assert_eq!(matching("date:2014-12-12"), vec![6]);
    assert_eq!(matching("date:>2014-01-01"), vec![6]);
}

#[test]
fn test_missing_tag_never_matches() {
    // Even a "not equal" comparison needs the tag to exist.
    assert_eq!(matching("key:!value"), Vec::<usize>::new());
    assert_eq!(matching("key:!other"), vec![3]);
}

#[test]
fn test_numeric_tag_compare() {
    let items = [
        make_item("a p:5"),
        make_item("b p:15"),
        make_item("c"),
        make_item("d p:abc"),
    ];
    let filter = compile("p:<10").unwrap();
    let matched: Vec<&str> = FilterEvaluator::new(&filter)
        .filter_items(&items)
        .iter()
        .map(|item| item.source())
        .collect();
    assert_eq!(matched, vec!["a p:5"]);
}

#[test]
fn test_any_repeated_tag_value_can_match() {
    let item = make_item("a p:1 p:20");
    assert!(evaluate(&compile("p:>10").unwrap(), &item));
    assert!(evaluate(&compile("p:<10").unwrap(), &item));
}

#[test]
fn test_priority_compare() {
    assert_eq!(matching("(C)"), vec![1, 3, 4, 5]);
    assert_eq!(matching("(<C)"), vec![2, 6]);
    assert_eq!(matching("(>=C)"), vec![1, 3, 4, 5]);
    assert_eq!(matching("(>C)"), Vec::<usize>::new());
    assert_eq!(matching("(!C)"), vec![2, 6]);
}

#[test]
fn test_no_priority_is_never_equal() {
    assert_eq!(matching("(Z)"), Vec::<usize>::new());
    assert_eq!(matching("(<Z)"), vec![6]);
}

#[test]
fn test_completion_state() {
    assert_eq!(matching("is:done"), vec![6]);
    assert_eq!(matching("is:open"), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_item_dates() {
    assert_eq!(matching("created:2015-11-05"), vec![1]);
    assert_eq!(matching("created:<2016-01-01"), vec![1]);
    assert_eq!(matching("completed:2014-12-12"), vec![6]);
}

#[test]
fn test_date_tags_resolve_relative_dates() {
    let items = [
        make_item("a due:2024-05-14"),
        make_item("b due:2024-05-15"),
        make_item("c due:2024-05-16"),
        make_item("d"),
        make_item("e due:someday"),
    ];
    let filter = compile_with_today("due:<=today", today()).unwrap();
    let matched: Vec<&str> = FilterEvaluator::new(&filter)
        .filter_items(&items)
        .iter()
        .map(|item| item.source())
        .collect();
    assert_eq!(matched, vec!["a due:2024-05-14", "b due:2024-05-15"]);
}

#[test]
fn test_regex() {
    assert_eq!(matching(r"/^\(C\) \d+ \+/"), vec![5]);
    assert_eq!(matching(r"/^\(C\) \d+/"), vec![1, 5]);
    assert_eq!(matching("/Bar|Baz/"), vec![2, 3]);
}

// ==================== Boolean Operator Tests ====================

#[test]
fn test_and_or_not() {
    assert_eq!(matching("@Context1 +Project1"), vec![3]);
    assert_eq!(matching("@Context1 OR +Project1"), vec![1, 2, 3]);
    assert_eq!(matching("@Context1 -+Project1"), vec![2]);
    assert_eq!(matching("-(@Context1 OR +Project1)"), vec![4, 5, 6]);
}

#[test]
fn test_negated_argument_group() {
    let filter =
        FilterParser::parse_args_with_today(&["--", "-@Context1 +Project2"], today()).unwrap();
    let filter = filter.unwrap();
    let matched: Vec<usize> = fixture()
        .iter()
        .enumerate()
        .filter(|(_, item)| evaluate(&filter, item))
        .map(|(idx, _)| idx + 1)
        .collect();
    assert_eq!(matched, vec![1, 3, 4, 5, 6]);
}

#[test]
fn test_quoted_phrase_after_terminator_is_literal_text() {
    let items = [
        make_item("Discuss -project1 naming"),
        make_item("Work on +project1"),
        make_item("Unrelated"),
    ];
    let filter = compile("-- \"-project1\"").unwrap();
    let matched: Vec<&str> = FilterEvaluator::new(&filter)
        .filter_items(&items)
        .iter()
        .map(|item| item.source())
        .collect();
    assert_eq!(matched, vec!["Discuss -project1 naming"]);
}

#[test]
fn test_quoted_phrase_with_spaces() {
    assert_eq!(matching("\"13 + 29\""), vec![5]);
    // Unquoted, the lone `+` is an empty project which never exists.
    assert_eq!(matching("13 + 29"), Vec::<usize>::new());
}

// ==================== Property Tests ====================

/// Small deterministic generator so property tests are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn pick<'a, T>(&mut self, choices: &'a [T]) -> &'a T {
        &choices[(self.next() as usize) % choices.len()]
    }
}

const ATOMS: [&str; 10] = [
    "@Context1",
    "+Project1",
    "(<C)",
    "key:value",
    "p:<10",
    "is:done",
    "beer",
    "created:<2016-01-01",
    "/\\d+/",
    "id:",
];

fn random_filter(rng: &mut Lcg, depth: u32) -> Filter {
    if depth == 0 || rng.next() % 3 == 0 {
        return compile_with_today(*rng.pick(&ATOMS[..]), today()).unwrap();
    }
    match rng.next() % 4 {
        0 => Filter::and(random_filter(rng, depth - 1), random_filter(rng, depth - 1)),
        1 => Filter::or(random_filter(rng, depth - 1), random_filter(rng, depth - 1)),
        2 => Filter::negate(random_filter(rng, depth - 1)),
        _ => Filter::group(random_filter(rng, depth - 1)),
    }
}

#[test]
fn test_evaluation_is_deterministic() {
    let mut rng = Lcg(7);
    let items = fixture();
    for _ in 0..200 {
        let filter = random_filter(&mut rng, 4);
        for item in &items {
            assert_eq!(evaluate(&filter, item), evaluate(&filter, item));
        }
    }
}

#[test]
fn test_double_negation_is_identity() {
    let mut rng = Lcg(11);
    let items = fixture();
    for _ in 0..200 {
        let filter = random_filter(&mut rng, 4);
        let doubled = Filter::negate(Filter::negate(filter.clone()));
        for item in &items {
            assert_eq!(evaluate(&doubled, item), evaluate(&filter, item));
        }
    }
}

#[test]
fn test_and_or_truth_tables() {
    let mut rng = Lcg(42);
    let items = fixture();
    for _ in 0..200 {
        let p = random_filter(&mut rng, 3);
        let q = random_filter(&mut rng, 3);
        let both = Filter::and(p.clone(), q.clone());
        let either = Filter::or(p.clone(), q.clone());
        for item in &items {
            let (a, b) = (evaluate(&p, item), evaluate(&q, item));
            assert_eq!(evaluate(&both, item), a && b);
            assert_eq!(evaluate(&either, item), a || b);
        }
    }
}

#[test]
fn test_group_is_transparent() {
    let filter = compile("@Context1").unwrap();
    let grouped = Filter::group(filter.clone());
    for item in &fixture() {
        assert_eq!(evaluate(&grouped, item), evaluate(&filter, item));
    }
}
