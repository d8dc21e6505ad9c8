// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur, on empile Neg,
//      prioritaire sur TOUT opérateur en attente (sinon "3 - -2" déclencherait
//      le '-' binaire pendant que son opérande manque encore)
//    - en RPN, Neg vaut (-1) × opérande ; il lie plus fort que '^' :
//      "-2 ^ 2" est (-2)^2
// - Multiplication implicite:
//    - une valeur suivie d’un début de valeur ("2x", "2(x+1)", "(a)(b)")
//      injecte un Star avec la précédence de '*'
// - '^' est associatif à droite et devient Expr::Pow (exposant général)
//
// NOTE:
// - Tok::Egal ne doit jamais arriver ici : eval découpe l’équation avant.

use super::expr::Expr;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Caret => 3,
        Tok::Neg => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret | Tok::Neg)
}

/// Début de valeur : atome ou parenthèse ouvrante.
fn is_debut_valeur(t: &Tok) -> bool {
    matches!(t, Tok::Num(_) | Tok::Ident(_) | Tok::LPar)
}

/// Dépile les opérateurs selon précédence/associativité, puis empile `op`.
fn empile_operateur(op: Tok, out: &mut Vec<Tok>, ops: &mut Vec<Tok>) {
    while let Some(top) = ops.last() {
        if matches!(top, Tok::LPar) {
            break;
        }

        let p_top = precedence(top);
        let p_op = precedence(&op);

        let doit_pop = if is_right_associative(&op) {
            p_top > p_op
        } else {
            p_top >= p_op
        };

        if doit_pop {
            out.push(ops.pop().expect("pile non vide"));
        } else {
            break;
        }
    }

    ops.push(op);
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Ident("x"), Plus, Num(1)]   (issus de "2x + 1")
///   rpn:    [Num(2), Ident("x"), Star, Num(1), Plus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, String> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et la multiplication implicite.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        // multiplication implicite : valeur suivie d’un début de valeur
        if prev_was_value && is_debut_valeur(&tok) {
            empile_operateur(Tok::Star, &mut out, &mut ops);
        }

        match tok {
            Tok::Num(_) | Tok::Ident(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut fermee = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        fermee = true;
                        break;
                    }
                    out.push(top);
                }
                if !fermee {
                    return Err("parenthèse fermante sans ouvrante".into());
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Star | Tok::Slash | Tok::Caret => {
                empile_operateur(tok, &mut out, &mut ops);
                prev_was_value = false;
            }

            Tok::Minus => {
                // moins unaire : Neg (prioritaire), sinon soustraction binaire
                if prev_was_value {
                    empile_operateur(Tok::Minus, &mut out, &mut ops);
                } else {
                    empile_operateur(Tok::Neg, &mut out, &mut ops);
                }
                prev_was_value = false;
            }

            Tok::Egal => return Err("'=' inattendu dans une expression".into()),

            Tok::Neg => return Err("expression invalide".into()),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err("parenthèses non fermées".into());
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, String> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(r) => st.push(Expr::Rat(r)),
            Tok::Ident(name) => st.push(Expr::Var(name)),

            Tok::Neg => {
                let a = st.pop().ok_or("expression invalide")?;
                st.push(Expr::Mul(Box::new(Expr::rat_i64(-1)), Box::new(a)));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = st.pop().ok_or("expression invalide")?;
                let a = st.pop().ok_or("expression invalide")?;

                let e = match tok {
                    Tok::Plus => Expr::Add(Box::new(a), Box::new(b)),
                    Tok::Minus => Expr::Sub(Box::new(a), Box::new(b)),
                    Tok::Star => Expr::Mul(Box::new(a), Box::new(b)),
                    Tok::Slash => Expr::Div(Box::new(a), Box::new(b)),
                    Tok::Caret => Expr::Pow(Box::new(a), Box::new(b)),
                    _ => unreachable!(),
                };

                st.push(e);
            }

            Tok::Egal => return Err("'=' inattendu en RPN".into()),

            Tok::LPar | Tok::RPar => return Err("parenthèse inattendue en RPN".into()),
        }
    }

    if st.len() != 1 {
        return Err("expression invalide".into());
    }
    Ok(st.pop().expect("pile de taille 1"))
}
