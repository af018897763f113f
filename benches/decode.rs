use criterion::{black_box, criterion_group, criterion_main, Criterion};
use qrdec::{decode, BitMatrix};

/// Version 1-M symbol for "HELLO WORLD"
const SMALL: &[&str] = &[
    "XXXXXXX.X...X.XXXXXXX",
    "X.....X...XXX.X.....X",
    "X.XXX.X..XXX..X.XXX.X",
    "X.XXX.X.X...X.X.XXX.X",
    "X.XXX.X.X..XX.X.XXX.X",
    "X.....X.X.X.X.X.....X",
    "XXXXXXX.X.X.X.XXXXXXX",
    "........X.X..........",
    "X...X.XXXXX.XXXXXX..X",
    "XX..XX...X..X.XXXXX..",
    "X.X.X.XX....X..XX.X.X",
    "X.XXXX..X.XXX..XXXX..",
    ".....XX..XXX.XXX..XXX",
    "........XXXXX..X.X...",
    "XXXXXXX.XX.X..X.....X",
    "X.....X..X...XXXXX.X.",
    "X.XXX.X.XXX.XXXX.XX.X",
    "X.XXX.X..XX.XXX..XXXX",
    "X.XXX.X...X.XX....X..",
    "X.....X...XXX...XX..X",
    "XXXXXXX.XXXX..XXX..XX",
];

/// Version 7-L symbol for "version seven payload"
const LARGE: &[&str] = &[
    "XXXXXXX....X..XX.XX.X.XXXX....XXXX..X.XXXXXXX",
    "X.....X..X.X.X.XX.X....X.X..X..X.X.X..X.....X",
    "X.XXX.X.XX...XXX....X.XXXX.XX.X.XX.X..X.XXX.X",
    "X.XXX.X..XX.XX.X..X....X.XXX....X..XX.X.XXX.X",
    "X.XXX.X...XXXXXX..X.XXXXXX.XX.X...XXX.X.XXX.X",
    "X.....X..X...X.XX.XXX...XX.X....XX....X.....X",
    "XXXXXXX.X.X.X.X.X.X.X.X.X.X.X.X.X.X.X.XXXXXXX",
    "........X.XX....XXX.X...XX....XX..X.X........",
    "XXX.XXXXXX..X.XXXX..XXXXXXX.X..X.X...XX...X..",
    "X.XX.X..XX..X..X.X.X..XX.X....XXX......XXX..X",
    "X..XX.X.XX...X.XX.X.X..X.XX.X.XX....X..XXXXXX",
    "XX.X...X..X..XXX....X.XXXX.X..X..X..XX.X.X.XX",
    ".X....XXX.X..X.XX.X...XX.XXX....XXXXXXXX.XX.X",
    "X..X....X...XX.X....X.XX.X.XX.X..X.X.X.XXX.X.",
    "..XX..X..X.X.X.XX.X.X..X.XXX..X.XXXXXXXX.X.X.",
    "XXXXXX...XXX.XXX....X.XXX.XX.X...X.X....X..XX",
    ".XXX.XX...XXXX..X.X...XX...X.XX.XXX..XXXX..X.",
    ".XX.X..XX..X.X..X...XX....XXXX............X.X",
    "X.X...X.XXX...X..X.XXXX.X.XX.XX.X..XX..XX..XX",
    "X..XXX.XX.......XXXX.X....X..X.X..XXX.X...X..",
    "X..XXXXXXX.XX.X.XX.XXXXXX...XXXX....XXXXX.XXX",
    ".X..X...XX..X...XX.XX...X.X..X.XX.XXX...XXX..",
    "..X.X.X.X...X.X..X..X.X.X.X.XXXX..XXX.X.XXX.X",
    "XXX.X...X.X.X...XXXXX...XX....XX....X...X....",
    "....XXXXXXX.X.XXXX.XXXXXXXX.X..X..X.XXXXX...X",
    "X...XX...X..X..X.X.X...X.X....XXXX..XXXX.X.XX",
    "X.X.X.X.X.X..X.XX.X...XXXXX.X.XX..XX.X.XXXXXX",
    "..X....XXXX.XXXX...X...X.X.X..X..X..XX.X.X.XX",
    "X.X.XXX...X.XX.XX.X.X.XXXXXX....XXX..X...XXXX",
    "XXXXXX.X.X..XX.X...XX..X.X.XX.X..X.X.XX...XX.",
    "XXXXX.XX..X..X.XX.XXXX..XXXX..X.XXX...XX.X.X.",
    "X.XXXX.X.XX.XXXX....XXX.X.XX.X....XX.XXX...XX",
    "X.X..XXXX.XXXX..X.XXXX.....X.XX.X.....X.X..X.",
    ".XX........X.X..X..XXX..X.XXXX....XX....X.X.X",
    "....X.XX.XXXX.X..X.XXX..X.XX.XX.X.X.X.X....XX",
    ".XXXX..X..XX....XXX.XXX.X.X..X.X..X.X...X.X..",
    "X..XX.X....XX.X.XX.XXXXXX...XXXX....XXXXX.XXX",
    "........X.XX....XX..X...X.X..X.XX.XXX...X.X..",
    "XXXXXXX.XXXXX.X..X..X.X.X.X.XXXX..X.X.X.X...X",
    "X.....X.X..X....XXXXX...XX....XX.X.XX...XX...",
    "X.XXX.X.XX..X.XXXX..XXXXXXX.X..X.XX.XXXXX...X",
    "X.XXX.X.....X..X.X....XXXX....XXXX.X.X..XX...",
    "X.XXX.X.XX...X.XX.X.X.XX.XX.X.XX.XXX..XXXXX.X",
    "X.....X.X...XXXX.....X...X.X..X..X.XX..X.X.X.",
    "XXXXXXX.X...XX.XX.X.XXX.XXXX....XXXX.X..XXXXX",
];

fn matrix_from(rows: &[&str]) -> BitMatrix {
    let mut matrix = BitMatrix::new(rows.len());
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.bytes().enumerate() {
            matrix.set(x, y, c == b'X');
        }
    }
    matrix
}

fn bench_decode_version1(c: &mut Criterion) {
    let matrix = matrix_from(SMALL);
    c.bench_function("decode_version1", |b| {
        b.iter(|| decode(black_box(&matrix), black_box("")))
    });
}

fn bench_decode_version7(c: &mut Criterion) {
    let matrix = matrix_from(LARGE);
    c.bench_function("decode_version7", |b| {
        b.iter(|| decode(black_box(&matrix), black_box("")))
    });
}

fn bench_decode_mirrored(c: &mut Criterion) {
    let mut matrix = matrix_from(SMALL);
    matrix.mirror();
    c.bench_function("decode_version1_mirrored", |b| {
        b.iter(|| decode(black_box(&matrix), black_box("")))
    });
}

criterion_group!(
    benches,
    bench_decode_version1,
    bench_decode_version7,
    bench_decode_mirrored
);
criterion_main!(benches);
