//! Fixed catalogs for keyword-based extraction. Order here is the order results are reported in.

/// Skills recognised by `extract_skills_from_resume`.
pub const SKILLS: &[&str] = &[
    "Python",
    "Data Analysis",
    "Machine Learning",
    "SQL",
    "Tableau",
    "Java",
    "C++",
    "JavaScript",
    "HTML",
    "CSS",
    "React",
    "Angular",
    "Node.js",
    "Git",
    "Matplotlib",
    "Seaborn",
    "Numpy",
    "Pandas",
];

/// Fields of study recognised by `extract_education_from_resume`.
pub const EDUCATION: &[&str] = &[
    "Computer Science",
    "Information Technology",
    "Software Engineering",
    "Business Administration",
    "Marketing",
];
