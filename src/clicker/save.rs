//! Button Clicker セーブ/ロード機能。
//!
//! ## 保存形式
//!
//! バージョン番号を持たない JSON オブジェクト 1 件:
//!
//! ```json
//! {
//!   "score": "1.5e400",
//!   "upgrades": { "intern": 3 },
//!   "purchasedSkins": ["default", "red"],
//!   "equippedSkin": "red",
//!   "singleUpgrades": { "intern_boost": { "1": true } }
//! }
//! ```
//!
//! - 欠けているフィールドはデフォルト値で補完する。
//! - `score` は精度を保つため文字列で書き出す。数値で書かれた旧データも読める。
//! - パースできないデータは破棄して新規ゲームとして扱う。呼び出し側には
//!   エラーを返さない。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::number::Num;

use super::state::{ProgressionState, DEFAULT_SKIN};
use super::store::{SaveError, SaveStore};

/// シリアライズ用のセーブデータ構造体。
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GameSave {
    score: Num,
    upgrades: BTreeMap<String, u64>,
    purchased_skins: Vec<String>,
    equipped_skin: String,
    /// ボーナス id → レベル → 購入済みか。
    single_upgrades: BTreeMap<String, BTreeMap<u32, bool>>,
}

impl Default for GameSave {
    fn default() -> Self {
        Self {
            score: Num::ZERO,
            upgrades: BTreeMap::new(),
            purchased_skins: vec![DEFAULT_SKIN.to_string()],
            equipped_skin: DEFAULT_SKIN.to_string(),
            single_upgrades: BTreeMap::new(),
        }
    }
}

/// ProgressionState からセーブ用データを抽出する。
fn extract_save(state: &ProgressionState) -> GameSave {
    GameSave {
        score: state.score,
        upgrades: state.upgrades.clone(),
        purchased_skins: state.purchased_skins.clone(),
        equipped_skin: state.equipped_skin.clone(),
        single_upgrades: state
            .single_upgrades
            .iter()
            .map(|(id, levels)| (id.clone(), levels.iter().map(|&l| (l, true)).collect()))
            .collect(),
    }
}

/// セーブデータから ProgressionState を組み立てる。
/// `default` スキンは必ず所持扱いにし、重複は取り除く。
fn apply_save(save: GameSave) -> ProgressionState {
    let mut purchased_skins: Vec<String> = Vec::with_capacity(save.purchased_skins.len() + 1);
    if !save.purchased_skins.iter().any(|s| s == DEFAULT_SKIN) {
        purchased_skins.push(DEFAULT_SKIN.to_string());
    }
    for skin in save.purchased_skins {
        if !purchased_skins.contains(&skin) {
            purchased_skins.push(skin);
        }
    }

    ProgressionState {
        score: save.score,
        upgrades: save.upgrades,
        purchased_skins,
        equipped_skin: save.equipped_skin,
        single_upgrades: save
            .single_upgrades
            .into_iter()
            .map(|(id, levels)| {
                let owned = levels
                    .into_iter()
                    .filter_map(|(level, bought)| bought.then_some(level))
                    .collect();
                (id, owned)
            })
            .collect(),
    }
}

/// 状態を保存形式の JSON にする。
pub fn encode(state: &ProgressionState) -> Result<String, SaveError> {
    Ok(serde_json::to_string(&extract_save(state))?)
}

/// 保存形式の JSON を状態に戻す。
pub fn decode(json: &str) -> Result<ProgressionState, serde_json::Error> {
    serde_json::from_str::<GameSave>(json).map(apply_save)
}

/// JSON から状態を復元する。壊れていればデフォルト状態を返す。
pub fn load_state(json: &str) -> ProgressionState {
    decode(json).unwrap_or_else(|e| {
        log::warn!("Button Clicker: セーブデータのパースに失敗（破棄します）: {e}");
        ProgressionState::new()
    })
}

/// ゲーム状態を保存する。
/// 失敗時はログを出して無視する。保存できたかどうかを返す。
pub fn save_game<S: SaveStore + ?Sized>(store: &mut S, state: &ProgressionState) -> bool {
    match encode(state).and_then(|json| store.write(&json)) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Button Clicker: セーブに失敗: {e}");
            false
        }
    }
}

/// 保存先からゲーム状態を復元する。
/// 未保存・読み込み失敗・パースエラーの場合はデフォルト状態（新規ゲーム）。
/// 壊れたデータは保存先から削除する。
pub fn load_game<S: SaveStore + ?Sized>(store: &mut S) -> ProgressionState {
    let json = match store.read() {
        Ok(Some(json)) => json,
        Ok(None) => return ProgressionState::new(),
        Err(e) => {
            log::warn!("Button Clicker: セーブデータの読み込みに失敗: {e}");
            return ProgressionState::new();
        }
    };

    match decode(&json) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("Button Clicker: セーブデータのパースに失敗（破棄します）: {e}");
            delete_save(store);
            ProgressionState::new()
        }
    }
}

/// セーブデータを削除する。
pub fn delete_save<S: SaveStore + ?Sized>(store: &mut S) {
    if let Err(e) = store.clear() {
        log::warn!("Button Clicker: セーブデータの削除に失敗: {e}");
    }
}
