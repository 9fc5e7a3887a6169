//! Question records and the two fixed per-player banks.

use adzan_core::error::DomainError;
use serde::Serialize;

use super::player::PlayerId;

/// Number of options every question offers.
pub const OPTION_COUNT: usize = 4;

/// Number of questions in each built-in bank.
pub const BANK_SIZE: usize = 20;

/// An immutable multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    prompt: &'static str,
    options: [&'static str; OPTION_COUNT],
    correct_index: usize,
}

impl Question {
    /// Creates a question.
    ///
    /// # Panics
    ///
    /// Panics if `correct_index` does not name one of the four options. For
    /// the built-in banks this is a compile-time failure.
    #[must_use]
    pub const fn new(
        prompt: &'static str,
        options: [&'static str; OPTION_COUNT],
        correct_index: usize,
    ) -> Self {
        assert!(correct_index < OPTION_COUNT, "correct_index out of range");
        Self {
            prompt,
            options,
            correct_index,
        }
    }

    /// The question text.
    #[must_use]
    pub const fn prompt(&self) -> &'static str {
        self.prompt
    }

    /// The four option texts, in display order.
    #[must_use]
    pub const fn options(&self) -> &[&'static str; OPTION_COUNT] {
        &self.options
    }

    /// Position of the correct option.
    #[must_use]
    pub const fn correct_index(&self) -> usize {
        self.correct_index
    }
}

/// The fixed, ordered question pool assigned to one player slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    player: PlayerId,
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Builds a custom bank.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `questions` is empty.
    pub fn new(player: PlayerId, questions: Vec<Question>) -> Result<Self, DomainError> {
        if questions.is_empty() {
            return Err(DomainError::Validation(format!(
                "question bank for {player} must not be empty"
            )));
        }
        Ok(Self { player, questions })
    }

    /// The built-in bank for `player`.
    #[must_use]
    pub fn for_player(player: PlayerId) -> Self {
        let questions = match player {
            PlayerId::One => PLAYER_ONE_QUESTIONS.to_vec(),
            PlayerId::Two => PLAYER_TWO_QUESTIONS.to_vec(),
        };
        Self { player, questions }
    }

    /// The player this bank belongs to.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Questions in bank order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions in the bank.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always `false` for a constructed bank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Both banks, indexed by [`PlayerId::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBanks([QuestionBank; 2]);

impl QuestionBanks {
    /// Pairs two banks.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the banks are not assigned to
    /// player 1 and player 2 respectively.
    pub fn new(player_one: QuestionBank, player_two: QuestionBank) -> Result<Self, DomainError> {
        if player_one.player != PlayerId::One || player_two.player != PlayerId::Two {
            return Err(DomainError::Validation(
                "banks must be assigned to player 1 and player 2".to_owned(),
            ));
        }
        Ok(Self([player_one, player_two]))
    }

    /// The bank for `player`.
    #[must_use]
    pub fn bank(&self, player: PlayerId) -> &QuestionBank {
        &self.0[player.index()]
    }

    /// Size of the smaller bank.
    #[must_use]
    pub fn min_len(&self) -> usize {
        self.0[0].len().min(self.0[1].len())
    }
}

impl Default for QuestionBanks {
    fn default() -> Self {
        Self([
            QuestionBank::for_player(PlayerId::One),
            QuestionBank::for_player(PlayerId::Two),
        ])
    }
}

const PLAYER_ONE_QUESTIONS: [Question; BANK_SIZE] = [
    Question::new("Apa arti kata 'Adzan'?", ["Pemberitahuan", "Doa", "Shalat", "Puasa"], 0),
    Question::new(
        "Siapa yang boleh mengumandangkan adzan?",
        ["Laki-laki muslim", "Perempuan", "Anak kecil", "Siapa saja"],
        0,
    ),
    Question::new(
        "Kapan adzan dikumandangkan?",
        ["Saat waktu shalat tiba", "Pagi hari", "Malam hari", "Kapan saja"],
        0,
    ),
    Question::new(
        "Berapa kali kalimat 'Allahu Akbar' di awal adzan?",
        ["4 kali", "2 kali", "3 kali", "5 kali"],
        0,
    ),
    Question::new(
        "Apa yang harus dilakukan saat mendengar adzan?",
        ["Mengikuti bacaan adzan", "Bermain", "Tidur", "Makan"],
        0,
    ),
    Question::new(
        "Ke arah mana muadzin menghadap saat adzan?",
        ["Kiblat", "Utara", "Selatan", "Timur"],
        0,
    ),
    Question::new(
        "Apa yang sunah dilakukan sebelum adzan?",
        ["Berwudhu", "Makan", "Tidur", "Bermain"],
        0,
    ),
    Question::new(
        "Mengapa muadzin memasukkan jari ke telinga?",
        ["Agar suara lebih keras", "Agar tidak sakit", "Agar bagus", "Tidak ada alasan"],
        0,
    ),
    Question::new(
        "Apa doa yang dibaca setelah adzan?",
        ["Doa setelah adzan", "Doa makan", "Doa tidur", "Doa bangun"],
        0,
    ),
    Question::new(
        "Apa hikmah dari adzan?",
        ["Mengingatkan waktu shalat", "Hiburan", "Olahraga", "Permainan"],
        0,
    ),
    Question::new(
        "Siapa yang lari saat mendengar adzan?",
        ["Setan", "Malaikat", "Manusia", "Hewan"],
        0,
    ),
    Question::new(
        "Berapa kali shalat fardhu dalam sehari?",
        ["5 kali", "3 kali", "4 kali", "6 kali"],
        0,
    ),
    Question::new(
        "Apa arti 'Hayya 'alash shalah'?",
        ["Marilah shalat", "Allah Maha Besar", "Tidak ada Tuhan", "Muhammad Rasul"],
        0,
    ),
    Question::new(
        "Apa arti 'Hayya 'alal falah'?",
        ["Marilah menuju keberuntungan", "Marilah shalat", "Allah Besar", "Tidak ada Tuhan"],
        0,
    ),
    Question::new(
        "Posisi apa yang sunah saat adzan?",
        ["Berdiri", "Duduk", "Tidur", "Berlari"],
        0,
    ),
    Question::new(
        "Apa yang harus kita lakukan setelah adzan?",
        ["Segera shalat", "Bermain", "Tidur", "Makan"],
        0,
    ),
    Question::new(
        "Berapa kali kalimat syahadat dalam adzan?",
        ["4 kali", "2 kali", "3 kali", "5 kali"],
        0,
    ),
    Question::new(
        "Apa syarat orang yang mengumandangkan adzan?",
        ["Beragama Islam", "Kaya", "Pintar", "Tinggi"],
        0,
    ),
    Question::new(
        "Dimana biasanya adzan dikumandangkan?",
        ["Masjid", "Rumah", "Sekolah", "Pasar"],
        0,
    ),
    Question::new(
        "Apa yang dimaksud dengan muadzin?",
        ["Orang yang adzan", "Orang yang shalat", "Orang yang puasa", "Orang yang zakat"],
        0,
    ),
];

const PLAYER_TWO_QUESTIONS: [Question; BANK_SIZE] = [
    Question::new(
        "Apa kalimat pertama dalam adzan?",
        ["Allahu Akbar", "Asyhadu", "Hayya", "La ilaha"],
        0,
    ),
    Question::new(
        "Apa kalimat terakhir dalam adzan?",
        ["La ilaha illallah", "Allahu Akbar", "Asyhadu", "Hayya"],
        0,
    ),
    Question::new(
        "Berapa jumlah kalimat dalam adzan?",
        ["15 kalimat", "10 kalimat", "20 kalimat", "5 kalimat"],
        0,
    ),
    Question::new(
        "Apa yang harus kita ucapkan saat muadzin bilang 'Allahu Akbar'?",
        ["Allahu Akbar", "Amin", "Subhanallah", "Alhamdulillah"],
        0,
    ),
    Question::new(
        "Kapan waktu shalat Subuh?",
        ["Sebelum matahari terbit", "Siang hari", "Sore hari", "Malam hari"],
        0,
    ),
    Question::new(
        "Kapan waktu shalat Dzuhur?",
        ["Siang hari", "Pagi hari", "Sore hari", "Malam hari"],
        0,
    ),
    Question::new(
        "Kapan waktu shalat Ashar?",
        ["Sore hari", "Pagi hari", "Siang hari", "Malam hari"],
        0,
    ),
    Question::new(
        "Kapan waktu shalat Maghrib?",
        ["Setelah matahari terbenam", "Pagi hari", "Siang hari", "Tengah malam"],
        0,
    ),
    Question::new(
        "Kapan waktu shalat Isya?",
        ["Malam hari", "Pagi hari", "Siang hari", "Sore hari"],
        0,
    ),
    Question::new(
        "Apa arti 'Allahu Akbar'?",
        ["Allah Maha Besar", "Allah Maha Kuasa", "Allah Maha Tinggi", "Allah Maha Adil"],
        0,
    ),
    Question::new(
        "Apa yang dimaksud dengan 'Asyhadu'?",
        ["Aku bersaksi", "Aku percaya", "Aku tahu", "Aku suka"],
        0,
    ),
    Question::new(
        "Siapa Nabi yang mengajarkan adzan?",
        ["Nabi Muhammad SAW", "Nabi Musa AS", "Nabi Isa AS", "Nabi Ibrahim AS"],
        0,
    ),
    Question::new(
        "Apa yang harus kita lakukan saat mendengar 'Hayya 'alash shalah'?",
        ["Mengikuti ucapannya", "Diam saja", "Bermain", "Tidur"],
        0,
    ),
    Question::new(
        "Mengapa kita harus shalat?",
        ["Perintah Allah", "Tradisi", "Kebiasaan", "Hobi"],
        0,
    ),
    Question::new(
        "Apa pahala orang yang mengumandangkan adzan?",
        ["Pahala besar", "Tidak ada", "Sedikit", "Biasa saja"],
        0,
    ),
    Question::new(
        "Bolehkah berbicara saat adzan?",
        ["Tidak boleh", "Boleh", "Kadang-kadang", "Terserah"],
        0,
    ),
    Question::new(
        "Apa yang harus kita baca setelah adzan selesai?",
        ["Doa setelah adzan", "Al-Fatihah", "Ayat Kursi", "Surat Ikhlas"],
        0,
    ),
    Question::new(
        "Berapa kali adzan dalam sehari?",
        ["5 kali", "3 kali", "4 kali", "6 kali"],
        0,
    ),
    Question::new(
        "Apa perbedaan adzan dan iqamah?",
        ["Iqamah lebih cepat", "Sama saja", "Iqamah lebih lambat", "Tidak ada bedanya"],
        0,
    ),
    Question::new(
        "Apa yang dimaksud dengan waktu shalat?",
        ["Waktu untuk melaksanakan shalat", "Waktu bermain", "Waktu makan", "Waktu tidur"],
        0,
    ),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_built_in_banks_hold_twenty_questions_each() {
        for player in PlayerId::ALL {
            let bank = QuestionBank::for_player(player);
            assert_eq!(bank.len(), BANK_SIZE);
            assert_eq!(bank.player(), player);
        }
    }

    #[test]
    fn test_built_in_banks_are_disjoint() {
        let one: HashSet<&str> = QuestionBank::for_player(PlayerId::One)
            .questions()
            .iter()
            .map(Question::prompt)
            .collect();
        let two: HashSet<&str> = QuestionBank::for_player(PlayerId::Two)
            .questions()
            .iter()
            .map(Question::prompt)
            .collect();

        assert_eq!(one.len(), BANK_SIZE);
        assert_eq!(two.len(), BANK_SIZE);
        assert!(one.is_disjoint(&two));
    }

    #[test]
    fn test_every_question_names_a_valid_correct_option() {
        let banks = QuestionBanks::default();
        for player in PlayerId::ALL {
            for question in banks.bank(player).questions() {
                assert!(question.correct_index() < OPTION_COUNT);
                assert!(!question.options()[question.correct_index()].is_empty());
            }
        }
    }

    #[test]
    fn test_empty_bank_is_rejected() {
        let result = QuestionBank::new(PlayerId::One, Vec::new());

        match result.unwrap_err() {
            DomainError::Validation(msg) => {
                assert_eq!(msg, "question bank for player 1 must not be empty");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_banks_must_match_player_slots() {
        let swapped = QuestionBanks::new(
            QuestionBank::for_player(PlayerId::Two),
            QuestionBank::for_player(PlayerId::One),
        );
        assert!(swapped.is_err());
    }

    #[test]
    #[should_panic(expected = "correct_index out of range")]
    fn test_question_rejects_out_of_range_correct_index() {
        let _ = Question::new("?", ["a", "b", "c", "d"], 4);
    }
}
