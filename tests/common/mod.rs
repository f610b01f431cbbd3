#![allow(dead_code)]

use cipherforge::codec::CipherStream;
use cipherforge::scorer::loader::load_quadgrams_from_reader;
use cipherforge::scorer::quadgram::QuadgramValues;
use cipherforge::scorer::QuadgramModel;
use cipherforge::transposer::{encipher, Permutation};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const PLAINTEXT: &str = "THE ENEMY FORCES ARE MASSING NORTH OF THE RIVER AND WILL ATTACK \
AT DAWN UNLESS THE BRIDGE IS DESTROYED BEFORE MIDNIGHT SEND ALL AVAILABLE ENGINEERS TO THE \
EASTERN BANK AND HOLD THE CROSSING UNTIL THE SECOND DIVISION ARRIVES FROM THE SOUTH WITH \
ARTILLERY AND FRESH SUPPLIES OF AMMUNITION FOR THE FRONT LINE TROOPS WHO HAVE BEEN FIGHTING \
FOR THREE DAYS WITHOUT REST";

pub const CORPUS: &str = "IT WAS THE BEST OF TIMES IT WAS THE WORST OF TIMES IT WAS THE AGE \
OF WISDOM IT WAS THE AGE OF FOOLISHNESS IT WAS THE EPOCH OF BELIEF IT WAS THE EPOCH OF \
INCREDULITY IT WAS THE SEASON OF LIGHT IT WAS THE SEASON OF DARKNESS IT WAS THE SPRING OF \
HOPE IT WAS THE WINTER OF DESPAIR WE HAD EVERYTHING BEFORE US WE HAD NOTHING BEFORE US WE \
WERE ALL GOING DIRECT TO HEAVEN WE WERE ALL GOING DIRECT THE OTHER WAY THERE WERE A KING \
WITH A LARGE JAW AND A QUEEN WITH A PLAIN FACE ON THE THRONE OF ENGLAND THERE WERE A KING \
WITH A LARGE JAW AND A QUEEN WITH A FAIR FACE ON THE THRONE OF FRANCE IN BOTH COUNTRIES IT \
WAS CLEARER THAN CRYSTAL TO THE LORDS OF THE STATE PRESERVES OF LOAVES AND FISHES THAT \
THINGS IN GENERAL WERE SETTLED FOR EVER";

/// Standard 6x6 fractionation square over `ADFGVX`.
const SQUARE: &[u8; 36] = b"PH0QG64MEA1YL2NOFDXKR3CVS5ZW7BJ9UTI8";
const COORDS: &[u8; 6] = b"ADFGVX";

pub fn letters(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_uppercase()).collect()
}

/// Plaintext letters trimmed so the fractionated stream divides by `k`.
pub fn plaintext_for_width(k: usize) -> String {
    let mut p = letters(PLAINTEXT);
    while (p.len() * 2) % k != 0 {
        p.pop();
    }
    p
}

pub fn fractionate(plain: &str) -> CipherStream {
    let mut out = String::with_capacity(plain.len() * 2);
    for b in plain.bytes() {
        let idx = SQUARE.iter().position(|&s| s == b).expect("symbol in square");
        out.push(COORDS[idx / 6] as char);
        out.push(COORDS[idx % 6] as char);
    }
    CipherStream::clean(&out)
}

pub fn synthetic_ciphertext(plain: &str, transpose: &Permutation) -> CipherStream {
    encipher(&fractionate(plain), transpose).expect("encipher")
}

fn training_text() -> String {
    let mut training = letters(CORPUS);
    for _ in 0..3 {
        training.push_str(&letters(PLAINTEXT));
    }
    training
}

fn quadgram_counts(training: &str) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for i in 0..training.len().saturating_sub(3) {
        *counts.entry(&training[i..i + 4]).or_insert(0) += 1;
    }
    counts
}

/// Sparse quadgram count table: the general corpus plus the plaintext a few times.
pub fn quadgram_table() -> String {
    let training = training_text();
    let counts = quadgram_counts(&training);
    let mut rows: Vec<(&str, usize)> = counts.into_iter().collect();
    rows.sort();
    rows.iter()
        .map(|(w, c)| format!("{} {}\n", w, c))
        .collect()
}

/// Model over the sparse table only.
pub fn sparse_model() -> QuadgramModel {
    load_quadgrams_from_reader(quadgram_table().as_bytes()).expect("model")
}

/// Every window gets a letter-frequency baseline on top of its observed
/// count, which gives the hill-climb a gradient a tiny corpus cannot.
pub fn smoothed_model() -> QuadgramModel {
    let training = training_text();
    let counts = quadgram_counts(&training);
    let n = training.len() as f64;

    let mut unigram = [0.5f64; 26];
    for b in training.bytes() {
        unigram[(b - b'A') as usize] += 1.0;
    }
    for u in unigram.iter_mut() {
        *u /= n;
    }

    let mut entries = Vec::with_capacity(26 * 26 * 26 * 26);
    let alphabet = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    for &a in alphabet {
        for &b in alphabet {
            for &c in alphabet {
                for &d in alphabet {
                    let w = [a, b, c, d];
                    let window = String::from_utf8_lossy(&w).into_owned();
                    let observed = counts.get(window.as_str()).copied().unwrap_or(0) as f64;
                    let baseline: f64 = w.iter().map(|&x| unigram[(x - b'A') as usize]).product();
                    entries.push((window, observed * 20.0 + baseline * n));
                }
            }
        }
    }
    QuadgramModel::from_entries(&entries, QuadgramValues::Counts).expect("model")
}

pub fn write_quadgrams(dir: &Path) -> PathBuf {
    let path = dir.join("quadgrams.txt");
    let mut file = File::create(&path).unwrap();
    write!(file, "{}", quadgram_table()).unwrap();
    path
}
