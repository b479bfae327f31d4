//! Property tests for the form codec, the sort order, and the
//! `search`/`searchParams` synchronization invariant.

use proptest::collection::vec;
use proptest::prelude::*;
use webapi_url::{
    Param, Url, UrlSearchParams, encode_form_encoded, form_encode, parse_form_encoded,
    percent_decode,
};

fn key_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        Just(String::new()),
        Just("a".to_string()),
        Just("b".to_string()),
        Just("key".to_string()),
        Just("a b".to_string()),
        Just("=&?#".to_string()),
        Just("日本語".to_string()),
        Just("🌈".to_string()),
        any::<String>(),
    ]
    .boxed()
}

fn value_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        Just(String::new()),
        Just("value".to_string()),
        Just("100%".to_string()),
        Just("a+b".to_string()),
        Just("✓".to_string()),
        any::<String>(),
    ]
    .boxed()
}

fn pairs_strategy() -> BoxedStrategy<Vec<(String, String)>> {
    vec((key_strategy(), value_strategy()), 0..8).boxed()
}

fn canonical_token_strategy() -> BoxedStrategy<String> {
    "[a-z0-9]{1,6}".boxed()
}

#[derive(Debug, Clone)]
enum ParamsOp {
    Append(String, String),
    Set(String, String),
    DeleteAll(String),
    DeletePair(String, String),
    Sort,
    SetSearch(Vec<(String, String)>),
}

fn params_op_strategy() -> BoxedStrategy<ParamsOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(k, v)| ParamsOp::Append(k, v)),
        (key_strategy(), value_strategy()).prop_map(|(k, v)| ParamsOp::Set(k, v)),
        key_strategy().prop_map(ParamsOp::DeleteAll),
        (key_strategy(), value_strategy()).prop_map(|(k, v)| ParamsOp::DeletePair(k, v)),
        Just(ParamsOp::Sort),
        vec((canonical_token_strategy(), canonical_token_strategy()), 0..4)
            .prop_map(ParamsOp::SetSearch),
    ]
    .boxed()
}

fn url_input_strategy() -> BoxedStrategy<String> {
    let scheme = prop_oneof![
        Just("http"),
        Just("https"),
        Just("ws"),
        Just("ftp"),
        Just("custom"),
    ];
    let host = prop_oneof![Just("example.com"), Just("a.b.test"), Just("localhost")];
    let segments = vec(canonical_token_strategy(), 0..4);
    let query = vec((canonical_token_strategy(), canonical_token_strategy()), 0..4);
    let fragment = proptest::option::of(canonical_token_strategy());

    (scheme, host, proptest::option::of(1024..65535u16), segments, query, fragment)
        .prop_map(|(scheme, host, port, segments, query, fragment)| {
            let mut out = format!("{scheme}://{host}");
            if let Some(port) = port {
                out.push_str(&format!(":{port}"));
            }
            out.push('/');
            out.push_str(&segments.join("/"));
            if !query.is_empty() {
                out.push('?');
                let encoded = query
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join("&");
                out.push_str(&encoded);
            }
            if let Some(fragment) = fragment {
                out.push('#');
                out.push_str(&fragment);
            }
            out
        })
        .boxed()
}

fn sorted_snapshot(params: &UrlSearchParams) -> Vec<(String, String)> {
    let mut entries = params.entries();
    entries.sort();
    entries
}

proptest! {
    #[test]
    fn encode_then_parse_preserves_pairs(raw_pairs in pairs_strategy()) {
        let pairs: Vec<Param> = raw_pairs
            .iter()
            .map(|(k, v)| Param::new(k.clone(), v.clone()))
            .collect();
        let encoded = encode_form_encoded(&pairs);
        prop_assert_eq!(parse_form_encoded(&encoded), pairs);
    }

    #[test]
    fn percent_decode_never_panics(input in any::<String>()) {
        let _ = percent_decode(&input);
    }

    #[test]
    fn form_encode_round_trips_through_decode(input in any::<String>()) {
        let decoded = percent_decode(&form_encode(&input).replace('+', " "));
        prop_assert_eq!(decoded, input);
    }

    #[test]
    fn sort_is_idempotent_and_preserves_pairs(raw_pairs in pairs_strategy()) {
        let mut params = UrlSearchParams::from_pairs(raw_pairs.clone());
        params.sort();
        let once = params.entries();
        params.sort();
        prop_assert_eq!(&once, &params.entries());

        let mut expected = raw_pairs;
        expected.sort();
        prop_assert_eq!(sorted_snapshot(&params), expected);
    }

    #[test]
    fn href_reparse_is_idempotent(input in url_input_strategy()) {
        let first = Url::new(&input, None).expect("generated input parses");
        let second = Url::new(&first.href(), None).expect("href re-parses");
        prop_assert_eq!(first.href(), second.href());
        prop_assert_eq!(first.pathname(), second.pathname());
        prop_assert_eq!(first.search(), second.search());
    }

    #[test]
    fn search_and_params_never_disagree(ops in vec(params_op_strategy(), 0..12)) {
        let mut url = Url::new("https://example.com/?seed=1", None).expect("parse");
        for op in ops {
            match op {
                ParamsOp::Append(key, value) => url.search_params_mut().append(key, value),
                ParamsOp::Set(key, value) => url.search_params_mut().set(key, value),
                ParamsOp::DeleteAll(key) => url.search_params_mut().delete_all(&key),
                ParamsOp::DeletePair(key, value) => {
                    url.search_params_mut().delete_pair(&key, &value)
                }
                ParamsOp::Sort => url.search_params_mut().sort(),
                ParamsOp::SetSearch(pairs) => {
                    let query = pairs
                        .iter()
                        .map(|(k, v)| format!("{k}={v}"))
                        .collect::<Vec<_>>()
                        .join("&");
                    url.set_search(&query);
                }
            }

            let serialized = url.search_params().to_string();
            if serialized.is_empty() {
                prop_assert_eq!(url.search(), "");
            } else {
                prop_assert_eq!(url.search(), format!("?{serialized}"));
            }
        }
    }
}
