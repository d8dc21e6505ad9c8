// src/main.rs
//
// Moteur Algèbre — console native
// -------------------------------
// But:
// - NATIF : petite boucle de lecture (une entrée par ligne) qui affiche
//   la forme EXACTE, le fragment LaTeX et la démarche du noyau
// - WEB (wasm32) : la bibliothèque exporte tout via wasm_bindgen,
//   main() reste vide ici

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use moteur_algebre::{en_latex, resoudre_detaille};
    use std::io::{self, BufRead, Write};

    println!("Moteur Algèbre — entrez une expression ou une équation (ligne vide pour quitter)");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        if stdout.flush().is_err() {
            break;
        }

        let mut ligne = String::new();
        match stdin.lock().read_line(&mut ligne) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("lecture impossible: {e}");
                break;
            }
        }

        let entree = ligne.trim();
        if entree.is_empty() {
            break;
        }

        match resoudre_detaille(entree) {
            Ok((exact, d)) => {
                println!("EXACT : {exact}");
                println!("LaTeX : {}", en_latex(&exact));
                println!("jetons: {}", d.jetons);
                println!("rpn   : {}", d.rpn);
                println!("avant : {}", d.avant);
                println!("après : {}", d.apres);
            }
            Err(e) => println!("erreur: {e}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, tout passe par les exports wasm_bindgen de la bibliothèque.
}
