//! Tracked smart wallets
//!
//! Hand-curated list of high-PNL Polymarket traders with their X handles,
//! rank-ordered by lifetime PNL. This is the only bundled dataset.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SmartWallet {
    pub address: &'static str,
    pub username: &'static str,
    pub twitter: &'static str,
    /// Lifetime PNL in USD
    pub pnl: f64,
}

impl SmartWallet {
    const fn new(address: &'static str, username: &'static str, twitter: &'static str, pnl: f64) -> Self {
        Self {
            address,
            username,
            twitter,
            pnl,
        }
    }
}

pub static SMART_WALLETS: [SmartWallet; 50] = [
    SmartWallet::new("0x17db3fcd93ba12d38382a0cade24b200185c5f6d", "Ansel Fang", "@AnselFang", 3180000.0),
    SmartWallet::new("0x5bffcf561bcae83af680ad600cb99f1184d6ffbe", "Harvey Mackinto", "@HarveyMackinto2", 2290000.0),
    SmartWallet::new("0x000d257d2dc7616feaef4ae0f14600fdf50a758e", "scottonPoly", "@scottonPoly", 1340000.0),
    SmartWallet::new("0x24c8cf69a0e0a17eee21f69d29752bfa32e823e1", "debased_PM", "@debased_PM", 1110000.0),
    SmartWallet::new("0x43372356634781eea88d61bbdd7824cdce958882", "AnjunPoly", "@AnjunPoly", 969000.0),
    SmartWallet::new("0xd218e474776403a330142299f7796e8ba32eb5c9", "friendlyping", "@friendlyping", 951000.0),
    SmartWallet::new("0xbaa2bcb5439e985ce4ccf815b4700027d1b92c73", "denizz_poly", "@denizz_poly", 494000.0),
    SmartWallet::new("0xc8ab97a9089a9ff7e6ef0688e6e591a066946418", "Eltonma", "@Eltonma", 463000.0),
    SmartWallet::new("0x1e1f17412069c0736adfaadf8ee7f46e5612c855", "BrokieTrades", "@BrokieTrades", 410000.0),
    SmartWallet::new("0xe8dd7741ccb12350957ec71e9ee332e0d1e6ec86", "influenzEth", "@influenzEth", 395000.0),
    SmartWallet::new("0x68469ab9009f2783e243a1d0957f4cdd8939b797", "Feifeitian", "@Feifeitian_0924", 326000.0),
    SmartWallet::new("0xfb79181a9d9dcaceda40803c0aeb55f6c58ec2c6", "player1", "@player1", 311000.0),
    SmartWallet::new("0x40471b34671887546013ceb58740625c2efe7293", "Frank", "@Frank3261939249", 285000.0),
    SmartWallet::new("0x9b979a065641e8cfde3022a30ed2d9415cf55e12", "verrissimus", "@verrissimus", 266000.0),
    SmartWallet::new("0xed61f86bb5298d2f27c21c433ce58d80b88a9aa3", "traXeH", "@traXeH_", 266000.0),
    SmartWallet::new("0xf68a281980f8c13828e84e147e3822381d6e5b1b", "Nooserac", "@Nooserac", 240000.0),
    SmartWallet::new("0xb10047d6a254b2ebb306d7a7d13bf59171ab6461", "Parz1valPM", "@Parz1valPM", 218000.0),
    SmartWallet::new("0x8f42ae0a01c0383c7ca8bd060b86a645ee74b88f", "cashyPoly", "@cashyPoly", 204000.0),
    SmartWallet::new("0xce66940dfe6dc18bc151d66d52a66eb2121bcc64", "cynical_reason", "@cynical_reason", 195000.0),
    SmartWallet::new("0xec981ed70ae69c5cbcac08c1ba063e734f6bafcd", "elucidxte", "@elucidxte", 186000.0),
    SmartWallet::new("0xc4086b708cd3a50880b7069add1a1a80000f4675", "JJo3999", "@JJo3999", 183000.0),
    SmartWallet::new("0x30e443872ddf63b2908a49f92cd690c304a55102", "AbrahamKurland", "@AbrahamKurland", 175000.0),
    SmartWallet::new("0x088ffbbc6f2c0b3839d2832e75f37e1bcecbc9e7", "MiSTkyGo", "@MiSTkyGo", 174000.0),
    SmartWallet::new("0x5ecde7348ea5100af4360dd7a6e0a3fb1d420787", "HanRiverVictim", "@HanRiverVictim", 157000.0),
    SmartWallet::new("0x05ab749a8554fb7c852238c271d384bae6798145", "Bambardini", "@Bambardini", 155000.0),
    SmartWallet::new("0x4cc3522b689a6bf1fb4a2444c523e7776db47552", "CSP_Trading", "@CSP_Trading", 153000.0),
    SmartWallet::new("0xddff18c9e86262e62af046d818dda0c3de6f52d6", "wkmfa57", "@wkmfa57", 150000.0),
    SmartWallet::new("0x8e8cf968a888c72a45627be3660d1c815d4c6657", "jongpatori", "@jongpatori", 141000.0),
    SmartWallet::new("0xc25427ea224b8f9fa2df801233f944006ed33f73", "polytalvi", "@polytalvi", 138000.0),
    SmartWallet::new("0x79add3f87e377b0899b935472c07d2c3816ba9f1", "OxyPredicts", "@OxyPredicts", 136000.0),
    SmartWallet::new("0xfbfd14dd4bb607373119de95f1d4b21c3b6c0029", "polymarketbet", "@polymarketbet", 134000.0),
    SmartWallet::new("0x1955273c5691a1330e264e9daf07411ba913aef1", "PatroclusPoly", "@PatroclusPoly", 129000.0),
    SmartWallet::new("0xfcb034faade540c47ad37e582f6e0c762feac865", "EricZhu06", "@EricZhu06", 128000.0),
    SmartWallet::new("0x1f0a343513aa6060488fabe96960e6d1e177f7aa", "archaic_on_Poly", "@archaic_on_Poly", 120000.0),
    SmartWallet::new("0x184e98eb1d39dfb9e7750e860512a9adbcbecf96", "gnome_labs", "@gnome_labs", 118000.0),
    SmartWallet::new("0x53a4f5be7d64abd9c49835374b5686cb86454447", "VespucciPM", "@VespucciPM", 117000.0),
    SmartWallet::new("0x22e4248bdb066f65c9f11cd66cdd3719a28eef1c", "evan_semet", "@evan_semet", 114000.0),
    SmartWallet::new("0x843a6da3886cf889435cf0920659a00a68db8070", "default717", "@default717", 104000.0),
    SmartWallet::new("0xcef7546f9069ecd6a05f7c1ad04c92b0f851e7d7", "ChineseMethod", "@ChineseMethod", 103000.0),
    SmartWallet::new("0xb48b9192dc52eed724fa58c66fa8926d06a3648e", "MonteCarloSpam", "@MonteCarloSpam", 99000.0),
    SmartWallet::new("0xc9b6227a295985591fe576ff2e054267a78a9b6a", "mango_lassi", "@mango_lassi", 97000.0),
    SmartWallet::new("0x8262ffa70186af8656abb788bdb778e3f67ba815", "thanksforshow", "@thanksforshow_", 86000.0),
    SmartWallet::new("0xa59c570a9eca148da55f6e1f47a538c0c600bb62", "ThePrexpect", "@ThePrexpect", 85000.0),
    SmartWallet::new("0xedc0f2cd1743914c4533368e15489c1a7a3d99f3", "tupac_poly", "@tupac_poly", 85000.0),
    SmartWallet::new("0x0f37cb80dee49d55b5f6d9e595d52591d6371410", "Hans323", "@Hans323", 84000.0),
    SmartWallet::new("0xfcf2378f20cf408d077c21e731272f21cccea469", "Roflan_ludoman", "@Roflan_ludoman", 82000.0),
    SmartWallet::new("0x0e5bd76779e74304d08e759072abf126d87da593", "JAHODA_J", "@JAHODA_J", 77000.0),
    SmartWallet::new("0x39d0f1dca6fb7e5514858c1a337724a426764fe8", "kekkospoly", "@kekkospoly", 77000.0),
    SmartWallet::new("0x36f9b0d0db05b7ffe5ff69774d70eb3f78607e3b", "JohnnyTenNums", "@JohnnyTenNums", 77000.0),
    SmartWallet::new("0xf0ed9e68e6cd3ee712260abeaec32de56a7d47d8", "xK0neko", "@xK0neko", 76000.0),
];

/// Look up a tracked wallet by address (case-insensitive)
pub fn find_smart_wallet(address: &str) -> Option<&'static SmartWallet> {
    SMART_WALLETS
        .iter()
        .find(|w| w.address.eq_ignore_ascii_case(address.trim()))
}

pub fn total_tracked_pnl() -> f64 {
    SMART_WALLETS.iter().map(|w| w.pnl).sum()
}

/// Validate a user-entered wallet address: `0x` followed by 40 hex chars.
/// Returns the lowercased address.
pub fn normalize_wallet_address(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))?;
    if hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(format!("0x{}", hex.to_ascii_lowercase()))
    } else {
        None
    }
}
