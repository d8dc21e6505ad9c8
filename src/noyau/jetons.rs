// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(BigRational),

    // Variables (tout ce qui n’est pas opérateur / nombre).
    // NOTE: le moteur n’a pas de fonctions nommées ; un ident est toujours une variable.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
    Egal,  // = (séparateur d’équation, traité dans eval)

    // Moins unaire. Jamais produit par tokenize : injecté par to_rpn quand
    // un '-' arrive sans valeur devant ; en RPN, vaut (-1) × opérande.
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers (ex: 12)
/// - décimaux exacts (ex: 2.5 -> 5/2, pas de flottants)
/// - opérateurs + - * / ^ =
/// - parenthèses ( )
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, String> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Tok::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            i += 1;
            continue;
        }

        // Opérateurs
        match c {
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                out.push(Tok::Star);
                i += 1;
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Caret);
                i += 1;
                continue;
            }
            '=' => {
                out.push(Tok::Egal);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_lowercase()));
            continue;
        }

        // Nombre : entier, éventuellement suivi d’une partie décimale ".ddd".
        // Le décimal devient un rationnel EXACT (2.5 -> 5/2), jamais un flottant.
        if c.is_ascii_digit() || (c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit())
        {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }

            let mut int_str: String = chars[start..i].iter().collect();
            if int_str.is_empty() {
                int_str.push('0'); // forme ".5"
            }
            let n = BigInt::parse_bytes(int_str.as_bytes(), 10).ok_or("nombre invalide")?;
            let mut rat = BigRational::from_integer(n);

            // partie décimale : ".ddd" (au moins un chiffre exigé après le point)
            if i < chars.len() && chars[i] == '.' {
                let save = i;
                i += 1;
                let start_d = i;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                if start_d == i {
                    i = save; // "." isolé : on laisse le point au tour suivant (erreur claire)
                } else {
                    let d_str: String = chars[start_d..i].iter().collect();
                    let d =
                        BigInt::parse_bytes(d_str.as_bytes(), 10).ok_or("décimales invalides")?;
                    let mut echelle = BigInt::one();
                    for _ in 0..d_str.len() {
                        echelle *= 10;
                    }
                    rat += BigRational::new(d, echelle);
                }
            }

            out.push(Tok::Num(rat));
            continue;
        }

        return Err(format!("caractère inattendu: '{c}'"));
    }

    Ok(out)
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        let n = r.numer();
        let d = r.denom();
        if d.is_one() {
            format!("{n}")
        } else {
            format!("{n}/{d}")
        }
    }

    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format_rat(r),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Egal => "=".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
