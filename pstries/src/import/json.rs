//! Recursive-descent parser for JSON table definitions

use super::{DefinitionError, Literal, TableDefinition};
use combine::{
    any, between, choice, eof,
    error::Commit,
    many, many1,
    parser::{
        char::{char, spaces},
        function,
    },
    satisfy, satisfy_map, sep_by,
    stream::{easy, position},
    ParseError, Parser, Stream,
};

fn lex<Input, P>(p: P) -> impl Parser<Input, Output = P::Output>
where
    P: Parser<Input>,
    Input: Stream<Token = char>,
{
    p.skip(spaces())
}

fn json_char<Input>() -> impl Parser<Input, Output = char>
where
    Input: Stream<Token = char>,
{
    function::parser(|input: &mut Input| {
        let (c, committed) = any().parse_lazy(input).into_result()?;

        let mut back_slash_char = satisfy_map(|c| {
            Some(match c {
                '"' => '"',
                '\\' => '\\',
                '/' => '/',
                'b' => '\u{0008}',
                'f' => '\u{000c}',
                'n' => '\n',
                'r' => '\r',
                't' => '\t',
                _ => return None,
            })
        });

        match c {
            '\\' => committed.combine(|_| back_slash_char.parse_stream(input).into_result()),
            '"' => Err(Commit::Peek(Input::Error::empty(input.position()).into())),
            _ => Ok((c, committed)),
        }
    })
}

fn string<Input>() -> impl Parser<Input, Output = String>
where
    Input: Stream<Token = char>,
{
    between(char('"'), lex(char('"')), many::<String, _, _>(json_char())).expected("string")
}

/// Captures everything that looks like the start of a number, range checks happen later on
fn number<Input>() -> impl Parser<Input, Output = String>
where
    Input: Stream<Token = char>,
{
    let first = satisfy(|c: char| c.is_ascii_digit() || c == '-');
    let rest = many::<String, _, _>(satisfy(|c: char| {
        c.is_ascii_alphanumeric() || c == '.' || c == '+' || c == '-'
    }));

    lex((first, rest))
        .map(|(first, rest): (char, String)| {
            let mut number = String::from(first);
            number.push_str(&rest);
            number
        })
        .expected("number")
}

fn bare_word<Input>() -> impl Parser<Input, Output = String>
where
    Input: Stream<Token = char>,
{
    lex(many1::<String, _, _>(satisfy(|c: char| c.is_ascii_alphabetic())))
}

fn literal<Input>() -> impl Parser<Input, Output = Literal>
where
    Input: Stream<Token = char>,
{
    choice((
        string().map(Literal::Text),
        number().map(Literal::Number),
        bare_word().map(Literal::Bare),
    ))
    .expected("value")
}

fn entry<Input>() -> impl Parser<Input, Output = (String, Literal)>
where
    Input: Stream<Token = char>,
{
    (string(), lex(char(':')), literal()).map(|(key, _, literal)| (key, literal))
}

fn table<Input>() -> impl Parser<Input, Output = TableDefinition>
where
    Input: Stream<Token = char>,
{
    let entries = between(
        lex(char('{')).expected("opening delimiter"),
        lex(char('}')).expected("closing delimiter"),
        sep_by::<Vec<_>, _, _, _>(entry(), lex(char(',')).expected("entry delimiter")),
    );

    (string(), lex(char(':')), entries).map(
        |(name, _, entries): (String, _, Vec<(String, Literal)>)| TableDefinition { name, entries },
    )
}

fn document<Input>() -> impl Parser<Input, Output = Vec<TableDefinition>>
where
    Input: Stream<Token = char>,
{
    let tables = between(
        lex(char('{')).expected("opening delimiter"),
        lex(char('}')).expected("closing delimiter"),
        sep_by::<Vec<_>, _, _, _>(table(), lex(char(',')).expected("table delimiter")),
    );

    spaces().with(tables).skip(eof())
}

type DefinitionStream<'a> = easy::Stream<position::Stream<&'a str, position::SourcePosition>>;

pub(super) fn definitions(input: &str) -> Result<Vec<TableDefinition>, DefinitionError> {
    let stream: DefinitionStream<'_> = easy::Stream(position::Stream::new(input));

    document()
        .parse(stream)
        .map(|(tables, _)| tables)
        .map_err(|error| DefinitionError::Syntax(error.to_string()))
}
