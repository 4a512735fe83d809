use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use esmlex_scanner::parse;

// A medium-size module mixing every construct the lexer has to classify
const MODULE_SOURCE: &str = r#"
import React, { useEffect, useState } from 'react';
import * as api from './api/index.js';
import config from './config.json' with { type: 'json' };
import './styles.css';

export { formatDate, parseDate } from './dates.js';
export * as validators from './validators.js';

const EMAIL = /^[^\s@]+@[^\s@]+\.[^\s@]+$/;
const SLUG = /[a-z0-9]+(?:-[a-z0-9]+)*/g;

export class Store {
    #items = new Map();

    constructor(initial = []) {
        for (const item of initial) {
            this.#items.set(item.id, item);
        }
    }

    get size() {
        return this.#items.size;
    }

    average() {
        let total = 0;
        for (const item of this.#items.values()) total += item.value;
        return total / this.size / 1;
    }

    async load(name) {
        const module = await import(`./stores/${name}.js`);
        return module.default;
    }
}

export function useStore(id) {
    const [state, setState] = useState(null);
    useEffect(() => {
        let cancelled = false;
        api.fetchStore(id).then((store) => {
            if (!cancelled) setState(store);
        });
        return () => {
            cancelled = true;
        };
    }, [id]);
    return state;
}

export const isEmail = (value) => EMAIL.test(value);
export const slugs = (text) => text.match(SLUG) ?? [];

export default async function bootstrap() {
    const { render } = await import('./render.js');
    const message = `Loaded ${config.name} at ${new Date().toISOString()}`;
    console.log(message, import.meta.url);
    return render(React.createElement('div', null, message));
}
"#;

fn bench_lex_module(c: &mut Criterion) {
    let units: Vec<u16> = MODULE_SOURCE.encode_utf16().collect();
    let mut group = c.benchmark_group("lex");
    group.throughput(Throughput::Bytes((units.len() * 2) as u64));
    group.bench_function("lex_module_medium", |b| {
        b.iter(|| {
            let result = parse(black_box(&units));
            black_box(result)
        });
    });
    group.finish();
}

fn bench_lex_large(c: &mut Criterion) {
    let source = MODULE_SOURCE
        .replace("export ", "")
        .replace("import ", "const _ = ")
        .repeat(50);
    let units: Vec<u16> = source.encode_utf16().collect();
    c.bench_function("lex_script_large", |b| {
        b.iter(|| black_box(parse(black_box(&units))));
    });
}

criterion_group!(benches, bench_lex_module, bench_lex_large);
criterion_main!(benches);
