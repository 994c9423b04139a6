// tests/metamorphic_segment.rs
//
// Metamorphic coverage for the segmenter: generate documents with the four
// regions (leading comment, variables block, one operation, N fragments) in
// random order with random separators, then check that
// 1) every region lands in its field, byte-exact after the flush/trim rule;
// 2) re-segmenting the extracted operation body is idempotent;
// 3) the cleaned variables template still parses as JSON.
//
// Fixed seed, so failures are reproducible.

use anyhow::Result;
use oorandom::Rand64;

use Arbalest::{jsonx, segment};

const ITERS: u64 = 200;

fn pick<'a>(rng: &mut Rand64, options: &[&'a str]) -> &'a str {
    options[(rng.rand_u64() % options.len() as u64) as usize]
}

fn sep(rng: &mut Rand64) -> &'static str {
    pick(rng, &[" ", "\n", "\n\n", "\t", " \n "])
}

fn gen_comment(rng: &mut Rand64, i: u64) -> String {
    match rng.rand_u64() % 3 {
        0 => format!("# doc {i}\n# second line"),
        1 => format!("/* doc {i} */"),
        _ => format!("// doc {i}"),
    }
}

fn gen_vars(rng: &mut Rand64, i: u64) -> String {
    match rng.rand_u64() % 3 {
        0 => format!("{{ \"id\": {i} }}"),
        1 => format!("{{ \"id\": {i}, \"tag\": \"t{i}\" }}"),
        // braces inside string values must not confuse the trim rule
        _ => format!("{{ \"q\": \"{{x{i}}}\", \"n\": {i} }}"),
    }
}

fn gen_query(rng: &mut Rand64, i: u64) -> String {
    match rng.rand_u64() % 3 {
        0 => format!("query Op{i} {{ user(id: $id) {{ name }} }}"),
        1 => format!("mutation Op{i}($n: Int!) {{ bump(n: $n) {{ id }} }}"),
        _ => format!("subscription Op{i} {{ events {{ kind payload }} }}"),
    }
}

fn gen_frag(i: u64, j: u64) -> String {
    format!("fragment F{i}x{j} on T {{ f{j} }}")
}

#[test]
fn segment_extracts_all_regions_in_any_order() -> Result<()> {
    let mut rng = Rand64::new(0xA11B_A1E5_7u128);

    for i in 0..ITERS {
        let with_comment = rng.rand_u64() % 2 == 0;
        let comment = gen_comment(&mut rng, i);
        let vars = gen_vars(&mut rng, i);
        let query = gen_query(&mut rng, i);
        let nfrags = rng.rand_u64() % 3;
        let frags: Vec<String> = (0..nfrags).map(|j| gen_frag(i, j)).collect();

        // regions after the leading comment, shuffled
        let mut rest: Vec<&str> = Vec::new();
        rest.push(&vars);
        rest.push(&query);
        for f in &frags {
            rest.push(f);
        }
        for k in (1..rest.len()).rev() {
            let j = (rng.rand_u64() % (k as u64 + 1)) as usize;
            rest.swap(k, j);
        }

        let mut doc = String::new();
        if with_comment {
            doc.push_str(&comment);
            // line comments run to end of line, so the separator here must
            // break the line
            doc.push('\n');
        }
        for r in &rest {
            doc.push_str(r);
            doc.push_str(sep(&mut rng));
        }

        let item = segment(&doc).map_err(|e| e.context(format!("doc #{i}: {doc:?}")))?;

        assert_eq!(item.query, query, "doc #{i}: {doc:?}");
        assert_eq!(item.vars, vars, "doc #{i}: {doc:?}");
        if with_comment {
            assert_eq!(item.comment, comment, "doc #{i}: {doc:?}");
        } else {
            assert!(item.comment.is_empty(), "doc #{i}: {doc:?}");
        }

        let mut got: Vec<&str> = item.frags.iter().map(|f| f.value.as_str()).collect();
        let mut want: Vec<&str> = frags.iter().map(|f| f.as_str()).collect();
        got.sort_unstable();
        want.sort_unstable();
        assert_eq!(got, want, "doc #{i}: {doc:?}");
        for f in &item.frags {
            assert!(f.name.starts_with(&format!("F{i}x")), "doc #{i}");
        }

        // idempotence of the flush/trim rule on the operation body
        let again = segment(&item.query)?;
        assert_eq!(again.query, item.query, "doc #{i}");

        // the raw vars block is a valid template after cleaning
        let cleaned = jsonx::clean(&item.vars);
        let _v: serde_json::Value = serde_json::from_str(&cleaned)?;
    }

    Ok(())
}
