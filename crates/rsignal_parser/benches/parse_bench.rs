use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rsignal_core::intern::StringInterner;
use rsignal_parser::Parser;

// A medium-size component module (~60 lines) mixing marker calls with
// ordinary ECMAScript constructs.
const MODULE_SOURCE: &str = r#"
import { $signal, $memo } from "solid-macros";
import { template as _$template, insert as _$insert } from "solid-js/web";

const _tmpl$ = /*#__PURE__*/ _$template(`<div><button>+</button><span></span></div>`);

export function Counter(props) {
    let count = $signal(props.initial ?? 0);
    let step = $signal(1, { equals: false });
    let doubled = $memo(count * 2);
    let label = $memo(() => `count is ${count}`);

    const increment = () => {
        count += step;
    };

    function reset() {
        count = 0;
        step = 1;
    }

    for (let i = 0; i < 3; i++) {
        if (i % 2 === 0) {
            count++;
        } else {
            --count;
        }
    }

    const el = _tmpl$();
    _$insert(el, () => doubled);
    _$insert(el, label);
    return { el, increment, reset };
}

class Store {
    #items = [];
    static create() {
        return new Store();
    }
    get size() {
        return this.#items.length;
    }
    add(item) {
        this.#items.push(item);
        return this;
    }
}

export default async function load(url) {
    const response = await fetch(url);
    const { data = [], ...rest } = await response.json();
    return data.filter((x) => x != null).map((x, i) => [i, x]);
}
"#;

fn bench_parse_module(c: &mut Criterion) {
    let interner = StringInterner::new();
    c.bench_function("parse_module_medium", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let mut parser = Parser::new(&arena, &interner, "bench.js", black_box(MODULE_SOURCE));
            let source_file = parser.parse_source_file();
            black_box(source_file.statements.len());
        });
    });
}

criterion_group!(benches, bench_parse_module);
criterion_main!(benches);
