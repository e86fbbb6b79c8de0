/// Delhi locality names used to label the 274 generated wards. The list
/// cycles with a sector suffix once exhausted.
pub const WARD_NAMES: &[&str] = &[
    "Rohini",
    "Dwarka",
    "Janakpuri",
    "Chanakyapuri",
    "Karol Bagh",
    "Connaught Place",
    "Saket",
    "Vasant Kunj",
    "Pitampura",
    "Shalimar Bagh",
    "Model Town",
    "Civil Lines",
    "Kamla Nagar",
    "Ashok Vihar",
    "Wazirpur",
    "Narela",
    "Bawana",
    "Alipur",
    "Burari",
    "Timarpur",
    "Mukherjee Nagar",
    "Shahdara",
    "Seelampur",
    "Gandhi Nagar",
    "Preet Vihar",
    "Laxmi Nagar",
    "Mayur Vihar",
    "Patparganj",
    "Trilokpuri",
    "Kalkaji",
    "Greater Kailash",
    "Hauz Khas",
    "Malviya Nagar",
    "Mehrauli",
    "Chhatarpur",
    "Najafgarh",
    "Uttam Nagar",
    "Tilak Nagar",
    "Rajouri Garden",
    "Punjabi Bagh",
    "Paschim Vihar",
    "Nangloi",
    "Mundka",
    "Kirti Nagar",
    "Moti Nagar",
    "Patel Nagar",
    "Rajender Nagar",
    "Paharganj",
    "Daryaganj",
    "Chandni Chowk",
    "Sadar Bazar",
    "Jahangirpuri",
    "Adarsh Nagar",
    "Keshav Puram",
    "Tri Nagar",
    "Kohat Enclave",
    "Shakurpur",
    "Sultanpuri",
    "Mangolpuri",
    "Kanjhawala",
    "Okhla",
    "Jamia Nagar",
    "Sarita Vihar",
    "Badarpur",
    "Tughlakabad",
    "Sangam Vihar",
    "Deoli",
    "Ambedkar Nagar",
    "Lajpat Nagar",
    "Defence Colony",
    "Jangpura",
    "Nizamuddin",
    "Vasant Vihar",
    "RK Puram",
    "Munirka",
    "Dilshad Garden",
    "Nand Nagri",
    "Gokalpur",
    "Mustafabad",
    "Karawal Nagar",
    "Yamuna Vihar",
    "Bhajanpura",
    "Vivek Vihar",
    "Anand Vihar",
    "Kondli",
    "Kalyanpuri",
    "Khichripur",
    "Geeta Colony",
    "Krishna Nagar",
    "Jaffrabad",
    "Welcome",
    "Seemapuri",
    "Ghonda",
    "Babarpur",
    "Maujpur",
    "Inderlok",
    "Shastri Nagar",
    "Sarai Rohilla",
    "Anand Parbat",
    "Dev Nagar",
    "Baljeet Nagar",
    "Madipur",
    "Raghubir Nagar",
    "Khyala",
    "Vikaspuri",
    "Hari Nagar",
    "Subhash Nagar",
    "Mahipalpur",
    "Rangpuri",
    "Kapashera",
    "Bijwasan",
    "Palam",
    "Sagarpur",
    "Dabri",
    "Matiala",
    "Bindapur",
    "Mohan Garden",
    "Nawada",
    "Hastsal",
    "Vikas Nagar",
    "Ranhola",
    "Hiran Kudna",
    "Bakkarwala",
    "Tikri Kalan",
    "Nilothi",
    "Peeragarhi",
    "Udyog Nagar",
    "Rohtas Nagar",
    "Jhilmil",
    "Mansarovar Park",
];
