//! Share-class symbols display with a slash (`BRK/B`) but travel to the
//! strategy process with a dash (`BRK-B`). The goal codec and the
//! invoker never touch symbol text; conversion happens at the display
//! edge.

pub fn wire_symbol(symbol: &str) -> String {
    symbol.replace('/', "-")
}

pub fn display_symbol(symbol: &str) -> String {
    symbol.replace('-', "/")
}
