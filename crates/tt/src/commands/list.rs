//! List command implementation.
//!
//! Lists items from the todo file: sorted, filtered by the default
//! relevance rules and an optional query, then limited.

use std::env;

use chrono::{Local, NaiveDate};
use todotxt_model_rs::ids::Identifiers;
use todotxt_model_rs::list::TodoList;
use todotxt_model_rs::models::Item;
use todotxt_view_rs::filter::{FilterParser, ViewFilter};
use todotxt_view_rs::limit::Limit;
use todotxt_view_rs::sort::Sorter;
use todotxt_view_rs::view::View;

use super::config::{load_config, ListConfig};
use super::{CommandContext, CommandError, Result};
use crate::output::{
    format_groups_plain, format_items_ical, format_items_json, format_items_plain, RowStyle,
};

const USAGE: &str = "Synopsis: ls [-x] [-n <NUM> | -N] [-s <SORT>] [-f plain|json|ical] [-i <ID>[,<ID>...]] [-g] [--] [EXPRESSION]";

const HELP: &str = "\
Lists all relevant items. An item is relevant when it is not completed, not
hidden with h:1, its start date (t:) is not in the future and it has no open
children (p:<id> referring to its id:<id>).

-x : Show all items, overriding the relevance rules and any limit.
-n : Show at most NUM items. Zero shows nothing, a negative number shows all.
-N : Show as many items as fit in the terminal.
-s : Sort expression, e.g. 'desc:due,priority'. Prefix a key with 'group:'
     to group by it.
-f : Output format, plain (default), json or ical.
-i : Only list the items with the given numbers or text ids, relevant or not.
-g : Print a header for every group.

EXPRESSION is a filter query. Each argument is a group of its own; an
argument starting with '-' negates its group. Use '--' before queries that
start with '-'.";

/// How the number of listed items is bounded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LimitOption {
    /// Use the configured `list_limit`.
    #[default]
    Default,
    /// `-n`, raw so that non-numbers fall back to the default.
    Count(String),
    /// `-N`.
    FitTerminal,
}

/// Output format selected with `-f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Plain,
    Json,
    Ical,
}

impl OutputFormat {
    /// Parses a `-f` value. Unknown values mean plain.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "ical" => OutputFormat::Ical,
            _ => OutputFormat::Plain,
        }
    }
}

/// Options for the list command.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Print usage instead of listing.
    pub help: bool,
    /// Disable the relevance filters and the limit (`-x`).
    pub show_all: bool,
    /// Item count limit.
    pub limit: LimitOption,
    /// Sort expression overriding the config.
    pub sort: Option<String>,
    /// Output format.
    pub format: Option<String>,
    /// Comma separated item numbers or text ids.
    pub ids: Option<String>,
    /// Print group headers.
    pub group: bool,
    /// Query arguments.
    pub query: Vec<String>,
}

impl ListOptions {
    /// Parses `ls` arguments getopt style.
    ///
    /// Flags may be clustered (`-xn5`). Parsing stops at `--` or at the first
    /// argument that is not a flag; everything after is the query.
    pub fn parse(args: &[String]) -> Result<Self> {
        let mut opts = Self::default();

        if args.first().map(String::as_str) == Some("help") {
            opts.help = true;
            return Ok(opts);
        }

        let mut rest = args.iter();
        while let Some(arg) = rest.as_slice().first() {
            if arg == "--" {
                rest.next();
                break;
            }
            let Some(flags) = arg.strip_prefix('-').filter(|f| !f.is_empty()) else {
                break;
            };
            rest.next();

            let mut chars = flags.char_indices();
            while let Some((idx, flag)) = chars.next() {
                match flag {
                    'x' => opts.show_all = true,
                    'N' => opts.limit = LimitOption::FitTerminal,
                    'g' => opts.group = true,
                    'n' | 's' | 'f' | 'i' => {
                        let inline = &flags[idx + flag.len_utf8()..];
                        let value = if inline.is_empty() {
                            rest.next().cloned().ok_or_else(|| {
                                CommandError::Usage(format!("option -{flag} requires argument"))
                            })?
                        } else {
                            inline.to_string()
                        };
                        match flag {
                            'n' => opts.limit = LimitOption::Count(value),
                            's' => opts.sort = Some(value),
                            'f' => opts.format = Some(value),
                            _ => opts.ids = Some(value),
                        }
                        break;
                    }
                    other => {
                        return Err(CommandError::Usage(format!(
                            "option -{other} not recognized"
                        )))
                    }
                }
            }
        }

        opts.query = rest.cloned().collect();
        Ok(opts)
    }

    /// Resolves the limit. `-x` wins over `-n` and `-N`.
    pub fn resolve_limit(&self, default: i64, rows: usize, reserved: usize) -> Limit {
        if self.show_all {
            return Limit::All;
        }
        match &self.limit {
            LimitOption::Default => Limit::from_count(default),
            LimitOption::Count(raw) => Limit::parse_count(raw, default),
            LimitOption::FitTerminal => Limit::FitTerminal { rows, reserved },
        }
    }

    /// Returns the selected output format.
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .as_deref()
            .map_or(OutputFormat::Plain, OutputFormat::parse)
    }

    /// Builds the filter chain: relevance rules, id list, then the query.
    ///
    /// Items picked by id are shown even when they are not relevant.
    pub fn filters<'a>(
        &self,
        list: &'a TodoList,
        ids: &Identifiers,
        today: NaiveDate,
    ) -> Result<Vec<ViewFilter<'a>>> {
        let mut filters = if self.show_all || self.ids.is_some() {
            Vec::new()
        } else {
            ViewFilter::relevance(list, today)
        };
        if let Some(raw) = &self.ids {
            filters.push(ViewFilter::identifiers(list, raw, ids));
        }
        if let Some(query) = FilterParser::parse_args_with_today(&self.query, today)? {
            filters.push(ViewFilter::Expression(query));
        }
        Ok(filters)
    }
}

/// Terminal height: `LINES` when set, otherwise the tty size, 0 if unknown.
pub fn terminal_rows() -> usize {
    if let Some(rows) = env::var("LINES").ok().and_then(|l| l.trim().parse().ok()) {
        return rows;
    }
    console::Term::stdout()
        .size_checked()
        .map(|(rows, _columns)| usize::from(rows))
        .unwrap_or(0)
}

/// Renders the listing.
fn render(
    ctx: &CommandContext,
    opts: &ListOptions,
    ls: &ListConfig,
    list: &TodoList,
    ids: &Identifiers,
    view: &View<'_>,
    use_colors: bool,
) -> Result<String> {
    let limit = opts.resolve_limit(ls.list_limit(), terminal_rows(), ls.reserved_lines());
    if ctx.verbose {
        eprintln!("Listing {} of {} items ({limit:?})", view.len(), list.len());
    }

    match opts.output_format() {
        OutputFormat::Json => {
            let items: Vec<&Item> = limit.apply(view.items().to_vec());
            return Ok(format_items_json(list, ids, &items)?);
        }
        OutputFormat::Ical => {
            let items: Vec<&Item> = limit.apply(view.items().to_vec());
            return Ok(format_items_ical(list, &items));
        }
        OutputFormat::Plain => {}
    }

    let hide_tags = ls.hide_tags();
    let style = RowStyle {
        format: ls.list_format(),
        hide_tags: &hide_tags,
        use_colors,
    };
    if opts.group || ls.group() {
        let groups = limit.apply_groups(view.groups());
        Ok(format_groups_plain(list, ids, &groups, style))
    } else {
        let items = limit.apply(view.items().to_vec());
        Ok(format_items_plain(list, ids, &items, style))
    }
}

/// Executes the list command.
///
/// # Errors
///
/// Returns an error for unknown flags, invalid sort or filter expressions,
/// or when the todo file cannot be read.
pub fn execute(ctx: &CommandContext, args: &[String]) -> Result<()> {
    let opts = ListOptions::parse(args)?;
    if opts.help {
        println!("{USAGE}\n\n{HELP}");
        return Ok(());
    }

    let config = load_config(ctx.config_path.as_deref())?;
    let store = ctx.store(&config)?;
    let list = store.load_or_default()?;
    let today = Local::now().date_naive();

    let ids = Identifiers::new(&list, config.identifiers());

    let sorter = Sorter::parse(opts.sort.as_deref().unwrap_or(config.ls.sort()))?;
    let filters = opts.filters(&list, &ids, today)?;
    let view = View::new(sorter, filters, list.items());

    let output = render(ctx, &opts, &config.ls, &list, &ids, &view, ctx.colors(&config))?;
    let machine_readable = opts.output_format() != OutputFormat::Plain;
    if !output.is_empty() && (!ctx.quiet || machine_readable) {
        println!("{output}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use todotxt_model_rs::ids::{text_ids, IdentifierStyle};

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|a| a.to_string()).collect()
    }

    fn parse(raw: &[&str]) -> ListOptions {
        ListOptions::parse(&args(raw)).unwrap()
    }

    fn fixture() -> TodoList {
        TodoList::from_lines([
            "(C) 2015-11-05 Foo @Context2 Not@Context +Project1 Not+Project",
            "(D) Bar @Context1 +Project2 p:1",
            "(C) Baz @Context1 +Project1 key:value id:1",
            "(C) Drink beer @ home",
            "(C) 13 + 29 = 42",
            "x 2014-12-12 Completed but with date:2014-12-12",
        ])
        .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    fn listed(raw: &[&str]) -> Vec<usize> {
        listed_with(raw, IdentifierStyle::LineNumber)
    }

    fn listed_with(raw: &[&str], style: IdentifierStyle) -> Vec<usize> {
        let list = fixture();
        let ids = Identifiers::new(&list, style);
        let opts = parse(raw);
        let view = View::new(
            Sorter::default(),
            opts.filters(&list, &ids, today()).unwrap(),
            list.items(),
        );
        opts.resolve_limit(-1, 0, 2)
            .apply(view.items().to_vec())
            .iter()
            .map(|item| list.number_of(item).unwrap())
            .collect()
    }

    #[test]
    fn test_parse_flags_and_query() {
        let opts = parse(&["-x", "-s", "text", "-f", "json", "Project1"]);
        assert!(opts.show_all);
        assert_eq!(opts.sort.as_deref(), Some("text"));
        assert_eq!(opts.output_format(), OutputFormat::Json);
        assert_eq!(opts.query, vec!["Project1"]);
    }

    #[test]
    fn test_parse_clustered_and_inline_values() {
        let opts = parse(&["-xgn3"]);
        assert!(opts.show_all);
        assert!(opts.group);
        assert_eq!(opts.limit, LimitOption::Count("3".to_string()));

        let opts = parse(&["-i1,3"]);
        assert_eq!(opts.ids.as_deref(), Some("1,3"));
    }

    #[test]
    fn test_parse_stops_at_first_query_word() {
        let opts = parse(&["-x", "+Project1", "-id:1"]);
        assert_eq!(opts.query, vec!["+Project1", "-id:1"]);
    }

    #[test]
    fn test_parse_terminator() {
        let opts = parse(&["-x", "--", "-@Context1 +Project2"]);
        assert!(opts.show_all);
        assert_eq!(opts.query, vec!["-@Context1 +Project2"]);
    }

    #[test]
    fn test_parse_unknown_flag() {
        let err = ListOptions::parse(&args(&["-z", "Zzz"])).unwrap_err();
        assert_eq!(err.to_string(), "option -z not recognized");
    }

    #[test]
    fn test_parse_missing_value() {
        let err = ListOptions::parse(&args(&["-n"])).unwrap_err();
        assert_eq!(err.to_string(), "option -n requires argument");
    }

    #[test]
    fn test_parse_help() {
        assert!(parse(&["help"]).help);
        assert!(!parse(&["-x", "help"]).help);
    }

    #[test]
    fn test_unknown_format_is_plain() {
        assert_eq!(parse(&["-f text"]).output_format(), OutputFormat::Plain);
        assert_eq!(parse(&["-f", "invalid"]).output_format(), OutputFormat::Plain);
        assert_eq!(parse(&[]).output_format(), OutputFormat::Plain);
        assert_eq!(parse(&["-f", "iCal"]).output_format(), OutputFormat::Ical);
    }

    #[test]
    fn test_resolve_limit() {
        assert_eq!(parse(&[]).resolve_limit(-1, 0, 2), Limit::All);
        assert_eq!(parse(&[]).resolve_limit(3, 0, 2), Limit::Count(3));
        assert_eq!(parse(&["-n", "foo"]).resolve_limit(2, 0, 2), Limit::Count(2));
        assert_eq!(parse(&["-n", "-1"]).resolve_limit(2, 0, 2), Limit::All);
        assert_eq!(
            parse(&["-N"]).resolve_limit(2, 9, 2),
            Limit::FitTerminal {
                rows: 9,
                reserved: 2
            }
        );
        assert_eq!(parse(&["-x", "-n", "foo"]).resolve_limit(2, 0, 2), Limit::All);
        assert_eq!(parse(&["-N", "-x"]).resolve_limit(2, 9, 2), Limit::All);
    }

    #[test]
    fn test_listing() {
        assert_eq!(listed(&[]), vec![1, 4, 5, 2]);
        assert_eq!(listed(&["-x"]), vec![1, 3, 4, 5, 2, 6]);
        assert_eq!(listed(&["Context1"]), vec![2]);
        assert_eq!(listed(&["-x", "Context1"]), vec![3, 2]);
        assert_eq!(listed(&["Project3"]), Vec::<usize>::new());
        assert_eq!(listed(&["--", "-project1"]), vec![4, 5, 2]);
        assert_eq!(listed(&["--", "-project1", "-Drink"]), vec![5, 2]);
        assert_eq!(listed(&["-x", "--", "-@Context1 +Project2"]), vec![1, 3, 4, 5, 6]);
        assert_eq!(listed(&["-x", "+Project1", "-id:1"]), vec![1]);
        assert_eq!(listed(&["-x", "id:"]), vec![3]);
        assert_eq!(listed(&["-x", "date:2014-12-12"]), vec![6]);
        assert_eq!(listed(&["p:<10"]), vec![2]);
        assert_eq!(listed(&["(<C)"]), vec![2]);
        assert_eq!(listed(&["created:2015-11-05"]), vec![1]);
    }

    #[test]
    fn test_listing_limits_and_ids() {
        assert_eq!(listed(&["-n", "0"]), Vec::<usize>::new());
        assert_eq!(listed(&["-n", "1"]), vec![1]);
        assert_eq!(listed(&["-n", "-1"]), vec![1, 4, 5, 2]);
        assert_eq!(listed(&["-i", "1"]), vec![1]);
        assert_eq!(listed(&["-i", "1,foo,3"]), vec![1, 3]);
        assert_eq!(listed(&["-i", "6,2", "Bar"]), vec![2]);
    }

    #[test]
    fn test_listing_by_text_id() {
        let ids = text_ids(fixture().items());
        let raw = format!("{},{}", ids[5], ids[0]);
        assert_eq!(listed_with(&["-i", &raw], IdentifierStyle::Text), vec![1, 6]);
        assert_eq!(
            listed_with(&["-i", &ids[2].to_uppercase()], IdentifierStyle::Text),
            vec![3]
        );
        assert_eq!(listed_with(&["-i", "2"], IdentifierStyle::Text), vec![2]);
    }

    #[test]
    fn test_fit_terminal_listing() {
        let lines: Vec<String> = (1..=50)
            .map(|n| {
                let letter = (b'A' + ((n - 1) % 26) as u8) as char;
                format!("({letter}) item {n}")
            })
            .collect();
        let list = TodoList::from_lines(&lines).unwrap();
        let view = View::new(Sorter::default(), Vec::new(), list.items());
        let opts = parse(&["-N"]);

        let shown = |rows| -> Vec<usize> {
            opts.resolve_limit(-1, rows, 2)
                .apply(view.items().to_vec())
                .iter()
                .map(|item| list.number_of(item).unwrap())
                .collect()
        };

        assert_eq!(shown(9), vec![1, 27, 2, 28, 3, 29, 4]);
        assert_eq!(shown(23).len(), 21);
        assert_eq!(shown(23).last(), Some(&11));
        assert_eq!(shown(0), vec![1]);
    }
}
